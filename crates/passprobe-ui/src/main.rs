//! PassProbe desktop entry point.

mod app;

fn main() -> iced::Result {
    app::run()
}
