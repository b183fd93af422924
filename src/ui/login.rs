/// Login screen
///
/// Name + email form. Both fields are validated client-side before any
/// request goes out; a failed request shows a generic error message.

use iced::widget::{button, column, container, text, text_input, Column};
use iced::{Alignment, Element, Length};

use crate::{Message, ShelterMatch};

pub fn view(app: &ShelterMatch) -> Element<'_, Message> {
    let mut content: Column<Message> = column![
        text("Shelter Match 🐶").size(40),
        text("Sign in to start searching").size(16),
        text_input("Your name", &app.login_name)
            .on_input(Message::LoginNameChanged)
            .padding(10)
            .width(Length::Fixed(320.0)),
        text_input("Your email", &app.login_email)
            .on_input(Message::LoginEmailChanged)
            .padding(10)
            .width(Length::Fixed(320.0)),
        button(text(if app.logging_in { "Signing in..." } else { "Sign In" }))
            .on_press_maybe((!app.logging_in).then_some(Message::LoginSubmitted))
            .padding(10),
    ]
    .spacing(20)
    .align_x(Alignment::Center);

    if let Some(error) = &app.login_error {
        content = content.push(text(error).size(14));
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
