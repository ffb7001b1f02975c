//! crates/oracle_core/src/navigation.rs
//!
//! The top-level view state machine: `Home` collects the user's details and a
//! highlighted tile, `Viewing` shows one reading view.

use serde::Serialize;
use tracing::debug;

use crate::domain::{ReadingType, UserData};

/// Which top-level screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", content = "reading_type", rename_all = "snake_case")]
pub enum Screen {
    Home,
    Viewing(ReadingType),
}

/// One tile on the home grid, as a front-end would draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub reading_type: ReadingType,
    pub title: &'static str,
    pub description: &'static str,
    pub enabled: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ViewController {
    user: UserData,
    highlighted: Option<ReadingType>,
    viewing: Option<ReadingType>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        match self.viewing {
            Some(reading_type) => Screen::Viewing(reading_type),
            None => Screen::Home,
        }
    }

    pub fn user(&self) -> &UserData {
        &self.user
    }

    pub fn highlighted(&self) -> Option<ReadingType> {
        self.highlighted
    }

    pub fn is_form_valid(&self) -> bool {
        self.user.is_complete()
    }

    /// Replaces the user's details. Only accepted on the home screen.
    pub fn update_user(&mut self, user: UserData) -> bool {
        if self.viewing.is_some() {
            return false;
        }
        self.user = user;
        true
    }

    /// Highlights a tile. A no-op while the form is incomplete.
    pub fn select_tile(&mut self, reading_type: ReadingType) -> bool {
        if self.viewing.is_some() || !self.is_form_valid() {
            return false;
        }
        self.highlighted = Some(reading_type);
        true
    }

    /// Commits the highlighted tile, moving `Home -> Viewing`.
    pub fn confirm(&mut self) -> Option<ReadingType> {
        if self.viewing.is_some() || !self.is_form_valid() {
            return None;
        }
        let chosen = self.highlighted?;
        debug!("Entering {} view", chosen.title());
        self.viewing = Some(chosen);
        Some(chosen)
    }

    /// Returns to `Home` from any view, keeping the user's details.
    pub fn back(&mut self) {
        self.viewing = None;
        self.highlighted = None;
    }

    /// The Vedic view's shortcut straight into the shop.
    pub fn open_shop(&mut self) -> bool {
        if self.viewing != Some(ReadingType::Vedic) {
            return false;
        }
        self.viewing = Some(ReadingType::Shop);
        true
    }

    /// The hint shown above the tile grid.
    pub fn instruction(&self) -> &'static str {
        if self.is_form_valid() {
            "Select a card below"
        } else {
            "Enter your details above"
        }
    }

    pub fn tiles(&self) -> Vec<Tile> {
        let enabled = self.is_form_valid();
        ReadingType::ALL
            .iter()
            .map(|&reading_type| Tile {
                reading_type,
                title: reading_type.title(),
                description: reading_type.description(),
                enabled,
                selected: self.highlighted == Some(reading_type),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn complete_user() -> UserData {
        UserData::new("Ada", NaiveDate::from_ymd_opt(1990, 8, 12).unwrap(), "London")
    }

    fn incomplete_users() -> Vec<UserData> {
        let full = complete_user();
        let mut no_name = full.clone();
        no_name.name = " ".into();
        let mut no_dob = full.clone();
        no_dob.dob = None;
        let mut no_place = full;
        no_place.birth_place = String::new();
        vec![no_name, no_dob, no_place, UserData::default()]
    }

    fn viewing(reading_type: ReadingType) -> ViewController {
        let mut controller = ViewController::new();
        controller.update_user(complete_user());
        controller.select_tile(reading_type);
        controller.confirm();
        controller
    }

    #[test]
    fn starts_at_home_with_nothing_highlighted() {
        let controller = ViewController::new();
        assert_eq!(controller.screen(), Screen::Home);
        assert_eq!(controller.highlighted(), None);
        assert_eq!(controller.instruction(), "Enter your details above");
    }

    #[test]
    fn incomplete_details_block_select_and_confirm() {
        for user in incomplete_users() {
            for reading_type in ReadingType::ALL {
                let mut controller = ViewController::new();
                controller.update_user(user.clone());
                assert!(!controller.select_tile(reading_type));
                assert_eq!(controller.confirm(), None);
                assert_eq!(controller.screen(), Screen::Home);
                assert!(controller.tiles().iter().all(|t| !t.enabled));
            }
        }
    }

    #[test]
    fn select_then_confirm_enters_exactly_that_view() {
        for reading_type in ReadingType::ALL {
            let mut controller = ViewController::new();
            controller.update_user(complete_user());
            assert!(controller.select_tile(reading_type));
            assert_eq!(controller.screen(), Screen::Home);
            assert_eq!(controller.confirm(), Some(reading_type));
            assert_eq!(controller.screen(), Screen::Viewing(reading_type));
        }
    }

    #[test]
    fn the_last_tapped_tile_wins() {
        let mut controller = ViewController::new();
        controller.update_user(complete_user());
        controller.select_tile(ReadingType::Tarot);
        controller.select_tile(ReadingType::Chinese);
        assert_eq!(controller.confirm(), Some(ReadingType::Chinese));
    }

    #[test]
    fn confirm_without_a_highlight_stays_home() {
        let mut controller = ViewController::new();
        controller.update_user(complete_user());
        assert_eq!(controller.confirm(), None);
        assert_eq!(controller.screen(), Screen::Home);
    }

    #[test]
    fn clearing_a_field_after_highlighting_blocks_confirm() {
        let mut controller = ViewController::new();
        controller.update_user(complete_user());
        controller.select_tile(ReadingType::Astrology);
        let mut edited = complete_user();
        edited.name.clear();
        controller.update_user(edited);
        assert_eq!(controller.confirm(), None);
    }

    #[test]
    fn back_keeps_details_and_clears_the_highlight() {
        for reading_type in ReadingType::ALL {
            let mut controller = viewing(reading_type);
            controller.back();
            assert_eq!(controller.screen(), Screen::Home);
            assert_eq!(controller.user(), &complete_user());
            assert_eq!(controller.highlighted(), None);
        }
    }

    #[test]
    fn vedic_view_opens_the_shop_directly() {
        let mut controller = viewing(ReadingType::Vedic);
        assert!(controller.open_shop());
        assert_eq!(controller.screen(), Screen::Viewing(ReadingType::Shop));
    }

    #[test]
    fn shop_shortcut_is_only_offered_from_vedic() {
        let mut home = ViewController::new();
        assert!(!home.open_shop());

        let mut astrology = viewing(ReadingType::Astrology);
        assert!(!astrology.open_shop());
        assert_eq!(astrology.screen(), Screen::Viewing(ReadingType::Astrology));
    }

    #[test]
    fn details_are_frozen_while_viewing() {
        let mut controller = viewing(ReadingType::Numerology);
        assert!(!controller.update_user(UserData::default()));
        assert_eq!(controller.user(), &complete_user());
    }

    #[test]
    fn tiles_reflect_validity_and_selection() {
        let mut controller = ViewController::new();
        controller.update_user(complete_user());
        controller.select_tile(ReadingType::Vedic);
        let tiles = controller.tiles();
        assert_eq!(tiles.len(), 6);
        assert!(tiles.iter().all(|t| t.enabled));
        let selected: Vec<_> = tiles.iter().filter(|t| t.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].description, "Vedic Wisdom & Doshas");
        assert_eq!(controller.instruction(), "Select a card below");
    }
}
