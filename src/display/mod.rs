pub mod framebuffer;
pub mod gamma;
pub mod layout;

/// The pixel matrix the compositor draws into.
///
/// Coordinates are logical screen pixels; any remapping onto tiled panels
/// happens behind this trait.
pub trait Display {
    /// Writes a grayscale level into the back buffer. Coordinates outside
    /// the screen are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, level: u8);

    /// Gamma-mapped 10-bit intensity currently shown at `(x, y)`, `0` off
    /// screen.
    fn front_value(&self, x: i32, y: i32) -> u16;

    /// Publishes the back buffer. `vsync` asks to wait for the scan-out of
    /// the current frame to finish first.
    fn flip(&mut self, vsync: bool);
}
