//! On-screen button menu.
//!
//! Four horizontal bands stacked top to bottom. One slot is always
//! highlighted; activating it runs the slot's [`Action`].

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use crate::bounded::truncated;
use crate::config::{MAX_LABEL_LEN, SELECTION_PADDING, TARGET_SELECTOR_SLOT, UI_SLOT_COUNT};
use crate::target::CommandVerb;
use crate::ui::input_logic::next_wrapping;
use crate::ui::palette::{DARK_GREEN, DARK_GREY, MAROON, NAVY, WHITE};
use crate::ui::Surface;

/// What a menu slot does when activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Select the next shutter.
    CycleTarget,
    /// Send a command to the selected shutter.
    Send(CommandVerb),
}

/// One selectable slot.
#[derive(Clone, Debug)]
pub struct MenuButton {
    pub color: Rgb565,
    label: String<MAX_LABEL_LEN>,
    pub action: Action,
}

impl MenuButton {
    pub fn new(color: Rgb565, label: &str, action: Action) -> Self {
        Self {
            color,
            label: truncated(label),
            action,
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_str()
    }
}

/// The fixed set of slots plus the highlighted one.
pub struct Menu {
    buttons: [MenuButton; UI_SLOT_COUNT],
    selected: usize,
}

impl Menu {
    /// Target selector followed by the three verb slots.
    pub fn new(target_label: &str) -> Self {
        let [raise, stop, lower] = CommandVerb::ALL;
        Self {
            buttons: [
                MenuButton::new(NAVY, target_label, Action::CycleTarget),
                MenuButton::new(DARK_GREEN, raise.caption(), Action::Send(raise)),
                MenuButton::new(DARK_GREY, stop.caption(), Action::Send(stop)),
                MenuButton::new(MAROON, lower.caption(), Action::Send(lower)),
            ],
            selected: 0,
        }
    }

    /// Move the highlight to the next slot, wrapping after the last.
    pub fn cycle_selection(&mut self) -> usize {
        self.selected = next_wrapping(self.selected, UI_SLOT_COUNT);
        self.selected
    }

    pub fn current(&self) -> &MenuButton {
        &self.buttons[self.selected]
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn button(&self, index: usize) -> Option<&MenuButton> {
        self.buttons.get(index)
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Replace the target selector's label (truncated to the label bound).
    pub fn set_target_label(&mut self, name: &str) {
        self.buttons[TARGET_SELECTOR_SLOT].label = truncated(name);
    }

    pub fn target_label(&self) -> &str {
        self.buttons[TARGET_SELECTOR_SLOT].label()
    }

    /// Screen band occupied by slot `index`.
    pub fn slot_area(index: usize, screen: Size) -> Rectangle {
        let height = screen.height / UI_SLOT_COUNT as u32;
        Rectangle::new(
            Point::new(0, (height * index as u32) as i32),
            Size::new(screen.width, height),
        )
    }

    /// Repaint one slot, highlighted or plain.
    pub fn render<S: Surface>(&self, surface: &mut S, index: usize, selected: bool) {
        let Some(button) = self.buttons.get(index) else {
            return;
        };
        let area = Self::slot_area(index, surface.size());

        if selected {
            surface.fill_rect(area, WHITE);
            surface.fill_rect(area.offset(-(SELECTION_PADDING as i32)), button.color);
        } else {
            surface.fill_rect(area, button.color);
        }

        surface.draw_centered_text(button.label(), area.center(), WHITE);
    }

    /// Repaint every slot with the current highlight.
    pub fn render_all<S: Surface>(&self, surface: &mut S) {
        for index in 0..self.buttons.len() {
            self.render(surface, index, index == self.selected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_selector_then_verbs() {
        let menu = Menu::new("living-room");
        assert_eq!(menu.button(0).unwrap().action, Action::CycleTarget);
        assert_eq!(
            menu.button(1).unwrap().action,
            Action::Send(CommandVerb::Raise)
        );
        assert_eq!(
            menu.button(2).unwrap().action,
            Action::Send(CommandVerb::Stop)
        );
        assert_eq!(
            menu.button(3).unwrap().action,
            Action::Send(CommandVerb::Lower)
        );
        assert_eq!(menu.target_label(), "living-room");
        assert_eq!(menu.button(3).unwrap().label(), "Down");
    }

    #[test]
    fn selection_wraps_after_last_slot() {
        let mut menu = Menu::new("x");
        for expected in [1, 2, 3, 0, 1] {
            assert_eq!(menu.cycle_selection(), expected);
        }
        assert_eq!(menu.current().action, Action::Send(CommandVerb::Raise));
    }

    #[test]
    fn selector_label_is_bounded() {
        let mut menu = Menu::new("x");
        menu.set_target_label("a-very-long-shutter-name-indeed");
        assert_eq!(menu.target_label().len(), MAX_LABEL_LEN);
        assert_eq!(menu.target_label(), "a-very-long-shutter");
    }

    #[test]
    fn slot_bands_split_the_screen_height() {
        let screen = Size::new(80, 160);
        assert_eq!(
            Menu::slot_area(0, screen),
            Rectangle::new(Point::new(0, 0), Size::new(80, 40))
        );
        assert_eq!(
            Menu::slot_area(3, screen),
            Rectangle::new(Point::new(0, 120), Size::new(80, 40))
        );
    }
}
