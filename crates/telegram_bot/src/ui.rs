//! Inline keyboard construction and callback data mapping.

use engine::{ChargeType, Choice, Location};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

pub(crate) fn choice_keyboard(options: &[(String, Choice)]) -> InlineKeyboardMarkup {
    let row = options
        .iter()
        .map(|(label, choice)| InlineKeyboardButton::callback(label.clone(), callback_data(*choice)))
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(vec![row])
}

fn callback_data(choice: Choice) -> &'static str {
    match choice {
        Choice::Location(Location::Home) => "loc:home",
        Choice::Location(Location::Outside) => "loc:outside",
        Choice::ChargeType(ChargeType::Full) => "charge:full",
        Choice::ChargeType(ChargeType::Partial) => "charge:partial",
    }
}

pub(crate) fn parse_choice(data: &str) -> Option<Choice> {
    match data {
        "loc:home" => Some(Choice::Location(Location::Home)),
        "loc:outside" => Some(Choice::Location(Location::Outside)),
        "charge:full" => Some(Choice::ChargeType(ChargeType::Full)),
        "charge:partial" => Some(Choice::ChargeType(ChargeType::Partial)),
        _ => None,
    }
}
