//! Drawing capability used by the menu and feedback screens.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};

/// The two drawing operations the controller needs from a display.
pub trait Surface {
    /// Drawable area in pixels.
    fn size(&self) -> Size;

    /// Fill `area` with `color`.
    fn fill_rect(&mut self, area: Rectangle, color: Rgb565);

    /// Draw `text` in `color`, centred horizontally and vertically on `center`.
    fn draw_centered_text(&mut self, text: &str, center: Point, color: Rgb565);

    /// Fill the whole surface.
    fn fill_screen(&mut self, color: Rgb565) {
        let area = Rectangle::new(Point::zero(), self.size());
        self.fill_rect(area, color);
    }

    /// Centre point of the surface.
    fn center(&self) -> Point {
        let size = self.size();
        Point::new(size.width as i32 / 2, size.height as i32 / 2)
    }
}

/// Middle-centre datum: text is anchored on its visual centre.
const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// [`Surface`] over any RGB565 `embedded-graphics` draw target.
///
/// Draw errors are dropped: a glitched frame is repainted on the next
/// menu refresh and there is nothing better to do with them mid-loop.
pub struct Canvas<D> {
    target: D,
}

impl<D> Canvas<D> {
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn inner(&self) -> &D {
        &self.target
    }
}

impl<D> Surface for Canvas<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    fn size(&self) -> Size {
        self.target.size()
    }

    fn fill_rect(&mut self, area: Rectangle, color: Rgb565) {
        let _ = area
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target);
    }

    fn draw_centered_text(&mut self, text: &str, center: Point, color: Rgb565) {
        let style = MonoTextStyle::new(&FONT_6X10, color);
        let _ = Text::with_text_style(text, center, style, CENTERED).draw(&mut self.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::pixelcolor::RgbColor;

    fn canvas() -> Canvas<MockDisplay<Rgb565>> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        Canvas::new(display)
    }

    #[test]
    fn fill_rect_paints_only_the_area() {
        let mut canvas = canvas();
        canvas.fill_rect(
            Rectangle::new(Point::new(2, 2), Size::new(4, 3)),
            Rgb565::RED,
        );
        let display = canvas.inner();
        assert_eq!(display.get_pixel(Point::new(2, 2)), Some(Rgb565::RED));
        assert_eq!(display.get_pixel(Point::new(5, 4)), Some(Rgb565::RED));
        assert_eq!(display.get_pixel(Point::new(6, 4)), None);
        assert_eq!(display.get_pixel(Point::new(1, 1)), None);
    }

    #[test]
    fn fill_screen_covers_the_whole_target() {
        let mut canvas = canvas();
        canvas.fill_screen(Rgb565::BLUE);
        let size = canvas.size();
        let display = canvas.inner();
        assert_eq!(display.get_pixel(Point::zero()), Some(Rgb565::BLUE));
        let corner = Point::new(size.width as i32 - 1, size.height as i32 - 1);
        assert_eq!(display.get_pixel(corner), Some(Rgb565::BLUE));
    }

    #[test]
    fn centered_text_straddles_the_anchor() {
        let mut canvas = canvas();
        let center = canvas.center();
        canvas.draw_centered_text("OK", center, Rgb565::WHITE);
        let display = canvas.inner();
        let lit_left = (0..center.x).any(|x| {
            (0..64).any(|y| display.get_pixel(Point::new(x, y)) == Some(Rgb565::WHITE))
        });
        let lit_right = (center.x..64).any(|x| {
            (0..64).any(|y| display.get_pixel(Point::new(x, y)) == Some(Rgb565::WHITE))
        });
        assert!(lit_left && lit_right);
    }
}
