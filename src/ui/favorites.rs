/// Favorites screen
///
/// Shows the resolved records for every favorited dog, with the same
/// cards as the search grid (so un-favoriting works in place), plus
/// clear-all and the jump to matching.

use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::{Message, Screen, ShelterMatch};

pub fn view(app: &ShelterMatch) -> Element<'_, Message> {
    let header = row![
        text("Your Favorites ★").size(28).width(Length::Fill),
        button("Home").on_press(Message::Navigate(Screen::Search)),
        button("Find a Match").on_press(Message::Navigate(Screen::Match)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let body: Element<Message> = if app.favorites.is_empty() {
        container(text("No favorites yet. Star some dogs from the search page!").size(18))
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding(40)
            .into()
    } else if app.favorites_loading {
        container(text("Loading your favorites...").size(18))
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding(40)
            .into()
    } else {
        let cards = app
            .favorite_dogs
            .iter()
            .map(|dog| super::results::card(app, dog))
            .collect();
        Wrap::with_elements(cards)
            .spacing(15.0)
            .line_spacing(15.0)
            .into()
    };

    let clear = button("Clear All")
        .on_press_maybe((!app.favorites.is_empty()).then_some(Message::FavoritesCleared));

    let content = column![header, scrollable(body).height(Length::Fill), clear]
        .spacing(20)
        .padding(20);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
