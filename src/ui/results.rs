/// The dog-card grid
///
/// Renders the four result states distinctly: not-yet-searched,
/// loading, no results, and the populated grid. Favorite state is read
/// live from the store at view time, so a toggle repaints immediately
/// without refetching.

use iced::widget::{button, column, container, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::api::models::Dog;
use crate::state::search::ResultsState;
use crate::{Message, ShelterMatch};

pub fn grid(app: &ShelterMatch) -> Element<'_, Message> {
    match &app.results {
        ResultsState::Idle => status_line("Search for dogs to get started."),
        ResultsState::Loading => status_line("Fetching dogs..."),
        ResultsState::Empty => status_line("No dogs found. Try different filters."),
        ResultsState::Loaded(dogs) => {
            let cards = dogs.iter().map(|dog| card(app, dog)).collect();
            Wrap::with_elements(cards)
                .spacing(15.0)
                .line_spacing(15.0)
                .into()
        }
    }
}

/// One dog card: photo (or placeholder), details, favorite toggle.
pub fn card<'a>(app: &'a ShelterMatch, dog: &'a Dog) -> Element<'a, Message> {
    let photo: Element<Message> = match app.images.get(&dog.id) {
        Some(handle) => iced::widget::image(handle.clone())
            .width(Length::Fixed(220.0))
            .height(Length::Fixed(160.0))
            .into(),
        // center_x/center_y set the size and center within it
        None => container(text("📷").size(40))
            .center_x(Length::Fixed(220.0))
            .center_y(Length::Fixed(160.0))
            .into(),
    };

    let favorited = app.favorites.contains(&dog.id);
    let star = if favorited { "★ Favorited" } else { "☆ Favorite" };

    container(
        column![
            photo,
            text(&dog.name).size(20),
            text(format!("Breed: {}", dog.breed)).size(14),
            text(format!("Age: {}", dog.age)).size(14),
            text(format!("Location: {}", dog.zip_code)).size(14),
            button(text(star).size(14))
                .on_press(Message::FavoriteToggled(dog.id.clone()))
                .padding(6),
        ]
        .spacing(6)
        .align_x(Alignment::Start),
    )
    .padding(12)
    .width(Length::Fixed(244.0))
    .into()
}

fn status_line(message: &str) -> Element<'_, Message> {
    container(text(message).size(18))
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(40)
        .into()
}
