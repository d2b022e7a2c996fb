use serde::Serialize;

use crate::model::TipCard;
use crate::widget::Widget;

/// A callout with a bit of information about one of the bots
/// in the current match.
///
/// # Displaying
/// - Display this widget periodically with a random card.
/// - Hide it after a couple of seconds.
#[derive(Serialize, Debug)]
pub struct TipCardWidget<'a> {
    pub title: &'a str,
    pub text: &'a str,
}

impl<'a> TipCardWidget<'a> {
    pub fn new(card: &'a TipCard) -> Self {
        TipCardWidget {
            title: &card.title,
            text: &card.text,
        }
    }
}

impl Widget for TipCardWidget<'_> {
    const FILE: &'static str = "tip_card.j2";
    const REGION: &'static str = "tipcard";
}
