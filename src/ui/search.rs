/// Search screen
///
/// Filter bar (name, breed, zip, age range), sort toggle, result grid,
/// and pagination. Name typing is debounced upstream in the update
/// loop; entering a name clears the attribute filters and vice versa.

use iced::widget::{button, column, container, pick_list, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length};

use crate::state::search::page_count;
use crate::{Message, Screen, ShelterMatch};

pub fn view(app: &ShelterMatch) -> Element<'_, Message> {
    let header = row![
        text("Shelter Match 🐶").size(28).width(Length::Fill),
        button(text(format!("Favorites ({})", app.favorites.len())))
            .on_press(Message::Navigate(Screen::Favorites)),
        button("Find a Match").on_press(Message::Navigate(Screen::Match)),
        button("Logout").on_press(Message::LogoutRequested),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let selected_breed = if app.form.breed.is_empty() {
        None
    } else {
        Some(app.form.breed.clone())
    };

    let filters = row![
        text_input("Search by name", &app.form.name)
            .on_input(Message::NameInput)
            .padding(8)
            .width(Length::Fixed(220.0)),
        pick_list(app.breeds.clone(), selected_breed, Message::BreedSelected)
            .placeholder("All breeds")
            .padding(8),
        button("×").on_press_maybe(
            (!app.form.breed.is_empty()).then_some(Message::BreedCleared)
        ),
        text_input("Zip code", &app.form.zip_code)
            .on_input(Message::ZipCodeChanged)
            .padding(8)
            .width(Length::Fixed(110.0)),
        text_input("Min age", &app.form.age_min)
            .on_input(Message::AgeMinChanged)
            .padding(8)
            .width(Length::Fixed(90.0)),
        text_input("Max age", &app.form.age_max)
            .on_input(Message::AgeMaxChanged)
            .padding(8)
            .width(Length::Fixed(90.0)),
        button("Search").on_press(Message::SearchRequested),
        button(text(format!("Sort: {}", app.form.sort.label())))
            .on_press(Message::SortToggled),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let mut content = column![header, filters].spacing(20).padding(20);

    // Gentle hint when the typed zip is not in the service's list;
    // the request still goes through as typed.
    let zip = app.form.zip_code.trim();
    if !zip.is_empty() && !app.zip_codes.is_empty() && !app.zip_codes.iter().any(|z| z == zip) {
        content = content.push(text("No dogs are listed under that zip code.").size(13));
    }

    content = content
        .push(scrollable(super::results::grid(app)).height(Length::Fill))
        .push(pagination(app));

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn pagination(app: &ShelterMatch) -> Element<'_, Message> {
    let pages = page_count(app.total);
    let page = app.form.page;

    let prev = (page > 0).then(|| Message::PageSelected(page - 1));
    let next = (pages > 0 && page + 1 < pages).then(|| Message::PageSelected(page + 1));

    let label = if pages == 0 {
        "Page - of -".to_string()
    } else {
        format!("Page {} of {}", page + 1, pages)
    };

    container(
        row![
            button("← Prev").on_press_maybe(prev),
            text(label).size(16),
            button("Next →").on_press_maybe(next),
        ]
        .spacing(15)
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .center_x(Length::Fill)
    .into()
}
