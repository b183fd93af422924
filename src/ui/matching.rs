/// Match screen
///
/// One button, enabled only while favorites is non-empty and no match
/// request is in flight. A successful match shows the resolved record;
/// a failed one leaves whatever was shown before untouched.

use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use crate::{Message, Screen, ShelterMatch};

pub fn view(app: &ShelterMatch) -> Element<'_, Message> {
    let header = row![
        text("Find Your Perfect Match! 🐶").size(28).width(Length::Fill),
        button("Home").on_press(Message::Navigate(Screen::Search)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let can_match = !app.favorites.is_empty() && !app.matching;
    let label = if app.matching {
        "Finding match..."
    } else {
        "Find My Match"
    };

    let mut content = column![
        header,
        button(text(label).size(18))
            .on_press_maybe(can_match.then_some(Message::MatchRequested))
            .padding(12),
    ]
    .spacing(25)
    .padding(20)
    .align_x(Alignment::Center);

    if app.favorites.is_empty() {
        content = content.push(text("Favorite at least one dog to request a match.").size(14));
    }

    if let Some(dog) = &app.matched {
        content = content.push(text("Your Match!").size(24));
        content = content.push(super::results::card(app, dog));
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .into()
}
