// SPDX-License-Identifier: GPL-3.0-only

//! Terminal frontend for the viewfinder
//!
//! Renders the screen description to the terminal. The live preview uses
//! Unicode half-block characters for improved vertical resolution.

use crate::app::bottom_bar::{BottomBar, SwipeDirection};
use crate::app::controls::{CaptureButton, ToggleControl};
use crate::app::view::{PreviewSpec, SettingsPanel, ViewfinderLayout};
use crate::app::{Message, Runtime, Screen, ToggleFlag, Viewfinder};
use crate::backends::Backends;
use crate::backends::camera::FileCamera;
use crate::backends::media_store::LibraryDirectory;
use crate::backends::permissions::StaticPermissions;
use crate::config::Config;
use crate::constants::{timing, ui};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use image::RgbImage;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// How long to wait for a recording to finalize when quitting
const EXIT_GRACE: Duration = Duration::from_secs(3);

const HELP: &str = "space capture | ←/→ mode | f flash | t timer | m mirror | a ratio | s flip | +/- zoom | g settings | o open | q quit";

/// Run the terminal viewfinder
pub fn run(config: Config, permissions: StaticPermissions) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;

    let camera = Arc::new(FileCamera::new(config.capture_directory()));
    let backends = Backends {
        camera: camera.clone(),
        permissions: Arc::new(permissions),
        media_store: Arc::new(LibraryDirectory::new(config.library_directory())),
    };

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &rt, &camera, config, backends);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    rt: &tokio::runtime::Runtime,
    camera: &FileCamera,
    config: Config,
    backends: Backends,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut runtime = Runtime::new(rt.handle().clone());
    let (mut app, init) = Viewfinder::new(config, backends);
    runtime.spawn(init);

    let mut show_help = false;

    loop {
        runtime.drain(&mut app);

        terminal.draw(|f| {
            let area = f.area();
            let screen = app.view();
            draw_screen(f.buffer_mut(), area, &screen, camera, show_help);
        })?;

        // Handle input with timeout for frame updates
        if event::poll(timing::TERMINAL_POLL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            // Ctrl+C to quit
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            if key.code == KeyCode::Char('q') {
                break;
            }
            if key.code == KeyCode::Char('h') {
                show_help = !show_help;
                continue;
            }

            if let Some(message) = key_message(&app, key) {
                runtime.dispatch(&mut app, message);
            }
        }
    }

    finish_pending_work(rt, &mut runtime, &mut app);
    Ok(())
}

/// Stop an active recording and let library saves complete before exit
fn finish_pending_work(rt: &tokio::runtime::Runtime, runtime: &mut Runtime, app: &mut Viewfinder) {
    if app.session().is_recording() {
        info!("Stopping recording before exit");
        runtime.dispatch(app, Message::Capture);
    }

    let settled = rt.block_on(tokio::time::timeout(EXIT_GRACE, async {
        while app.session().is_recording() || app.has_pending_saves() {
            match runtime.next().await {
                Some(message) => runtime.dispatch(app, message),
                None => break,
            }
        }
    }));
    if settled.is_err() {
        warn!("Exiting with capture work still pending");
    }
}

/// Map a key press to a viewfinder message
fn key_message(app: &Viewfinder, key: KeyEvent) -> Option<Message> {
    let modes = app.build_mode_switcher();
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('p') => Some(Message::Capture),
        KeyCode::Right => modes.swipe(SwipeDirection::Left),
        KeyCode::Left => modes.swipe(SwipeDirection::Right),
        KeyCode::Char(c @ '1'..='4') => modes.select(c as usize - '1' as usize),
        KeyCode::Char('f') => Some(Message::Toggle(ToggleFlag::Flash)),
        KeyCode::Char('t') => Some(Message::Toggle(ToggleFlag::Timer)),
        KeyCode::Char('m') => Some(Message::Toggle(ToggleFlag::Mirror)),
        KeyCode::Char('a') => Some(Message::Toggle(ToggleFlag::WideAspect)),
        KeyCode::Char('s') => Some(Message::FlipCamera),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Message::ZoomIn),
        KeyCode::Char('-') => Some(Message::ZoomOut),
        KeyCode::Char('g') => Some(Message::ToggleSettings),
        KeyCode::Char('u') if app.settings_visible() => Some(Message::ToggleAutofocus),
        KeyCode::Char('c') if app.settings_visible() => Some(Message::CycleTimerPreset),
        KeyCode::Char('o') => Some(Message::OpenLastMedia),
        _ => None,
    }
}

fn draw_screen(
    buf: &mut Buffer,
    area: Rect,
    screen: &Screen,
    camera: &FileCamera,
    show_help: bool,
) {
    match screen {
        Screen::RequestingPermissions => {
            centered_text(buf, area, "Requesting permissions...", Style::default())
        }
        Screen::NoAccess => centered_text(
            buf,
            area,
            "No access to camera",
            Style::default().fg(Color::Red),
        ),
        Screen::Viewfinder(layout) => draw_viewfinder(buf, area, layout, camera, show_help),
    }
}

fn draw_viewfinder(
    buf: &mut Buffer,
    area: Rect,
    layout: &ViewfinderLayout,
    camera: &FileCamera,
    show_help: bool,
) {
    // Rows: top bar, preview, modes, capture row, status
    let top = Rect { height: 1.min(area.height), ..area };
    let status_y = area.y + area.height.saturating_sub(1);
    let capture_y = status_y.saturating_sub(1);
    let modes_y = capture_y.saturating_sub(1);
    let preview = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: modes_y.saturating_sub(area.y + 1),
    };

    TopBar {
        controls: &layout.top_bar,
    }
    .render(top, buf);

    let frame = preview_frame(preview, &layout.preview, camera);
    FrameWidget { frame: frame.as_ref() }.render(preview, buf);

    ModeBar {
        bottom_bar: &layout.bottom_bar,
    }
    .render(row(area, modes_y), buf);

    CaptureRow {
        bottom_bar: &layout.bottom_bar,
        capture_button: &layout.capture_button,
    }
    .render(row(area, capture_y), buf);

    let status = match &layout.banner {
        Some(banner) => StatusBar {
            message: banner.text(),
            background: Color::Red,
        },
        None => StatusBar {
            message: if show_help {
                HELP.to_string()
            } else {
                "'space' capture | 'h' help | 'q' quit".to_string()
            },
            background: Color::DarkGray,
        },
    };
    status.render(row(area, status_y), buf);

    if let Some(settings) = &layout.settings {
        SettingsOverlay { panel: settings }.render(preview, buf);
    }
}

fn row(area: Rect, y: u16) -> Rect {
    Rect {
        x: area.x,
        y,
        width: area.width,
        height: if area.height > 0 { 1 } else { 0 },
    }
}

/// Render a preview frame sized to fit the area at the preview's aspect
fn preview_frame(area: Rect, spec: &PreviewSpec, camera: &FileCamera) -> Option<RgbImage> {
    let (width, rows) = fit_preview(area, spec.aspect());
    if width == 0 || rows == 0 {
        return None;
    }
    Some(camera.preview_frame(u32::from(width), u32::from(rows) * 2))
}

/// Largest (columns, rows) with the given width/height ratio inside `area`
///
/// Each cell shows two vertical pixels, so pixels are roughly square.
fn fit_preview(area: Rect, aspect: f32) -> (u16, u16) {
    let term_width = f32::from(area.width);
    let term_height = f32::from(area.height) * 2.0;
    if term_height <= 0.0 || aspect <= 0.0 {
        return (0, 0);
    }

    let (w, h) = if term_width / term_height > aspect {
        // Terminal is wider - fit to height
        (term_height * aspect, term_height)
    } else {
        // Terminal is taller - fit to width
        (term_width, term_width / aspect)
    };
    (w as u16, (h / 2.0) as u16)
}

fn centered_text(buf: &mut Buffer, area: Rect, text: &str, style: Style) {
    let width = text.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height / 2;
    if y < area.y + area.height && x < area.x + area.width {
        buf.set_stringn(x, y, text, usize::from(area.width), style);
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Top bar of toggles
struct TopBar<'a> {
    controls: &'a [ToggleControl<Message>],
}

impl Widget for TopBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let mut x = area.x + 1;
        for control in self.controls {
            let label = format!("[{}]", control.icon().label());
            let style = Style::default().fg(rgb(control.tint().rgb()));
            let style = if control.enabled() {
                style.add_modifier(Modifier::BOLD)
            } else {
                style
            };
            let remaining = usize::from((area.x + area.width).saturating_sub(x));
            let (next_x, _) = buf.set_stringn(x, area.y, &label, remaining, style);
            x = next_x + 1;
        }
    }
}

/// Widget that renders a preview frame using half-block characters
struct FrameWidget<'a> {
    frame: Option<&'a RgbImage>,
}

impl Widget for FrameWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(frame) = self.frame else {
            centered_text(buf, area, "Waiting for camera...", Style::default());
            return;
        };

        let display_width = (frame.width() as u16).min(area.width);
        let display_height = ((frame.height() / 2) as u16).min(area.height);

        // Center the image
        let x_offset = area.x + area.width.saturating_sub(display_width) / 2;
        let y_offset = area.y + area.height.saturating_sub(display_height) / 2;

        // Each terminal cell represents 2 vertical pixels:
        // - Upper half (▀) colored with fg
        // - Lower half colored with bg
        for ty in 0..display_height {
            for tx in 0..display_width {
                let top = frame.get_pixel(u32::from(tx), u32::from(ty) * 2);
                let bottom = frame.get_pixel(u32::from(tx), u32::from(ty) * 2 + 1);
                if let Some(cell) = buf.cell_mut((x_offset + tx, y_offset + ty)) {
                    cell.set_char('▀');
                    cell.set_fg(Color::Rgb(top[0], top[1], top[2]));
                    cell.set_bg(Color::Rgb(bottom[0], bottom[1], bottom[2]));
                }
            }
        }
    }
}

/// Centered row of mode labels
struct ModeBar<'a> {
    bottom_bar: &'a BottomBar,
}

impl Widget for ModeBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let items = self.bottom_bar.modes.items();
        let total: usize = items
            .clone()
            .map(|item| item.label.chars().count() + 3)
            .sum();
        let mut x = area.x + area.width.saturating_sub(total as u16) / 2;

        for item in items.restart() {
            let style = if item.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(rgb(ui::MODE_SELECTED))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let label = format!(" {} ", item.label.to_uppercase());
            let remaining = usize::from((area.x + area.width).saturating_sub(x));
            let (next_x, _) = buf.set_stringn(x, area.y, &label, remaining, style);
            x = next_x + 1;
        }
    }
}

/// Last capture, capture button and camera switcher
struct CaptureRow<'a> {
    bottom_bar: &'a BottomBar,
    capture_button: &'a CaptureButton,
}

impl Widget for CaptureRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let last = match &self.bottom_bar.last_media {
            Some(media) => format!("▣ {}", media.uri.file_name()),
            None => "▢".to_string(),
        };
        buf.set_stringn(
            area.x + 1,
            area.y,
            &last,
            usize::from(area.width / 3),
            Style::default().fg(Color::White),
        );

        let label = format!("( {} )", self.capture_button.label());
        let width = label.chars().count() as u16;
        buf.set_stringn(
            area.x + area.width.saturating_sub(width) / 2,
            area.y,
            &label,
            usize::from(area.width),
            Style::default()
                .fg(rgb(self.capture_button.rgb()))
                .add_modifier(Modifier::BOLD),
        );

        let flip = "⟲ flip";
        let flip_style = if self.bottom_bar.flip_enabled {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(rgb(ui::CAPTURE_DISABLED))
        };
        let flip_width = flip.chars().count() as u16;
        buf.set_string(
            (area.x + area.width).saturating_sub(flip_width + 1),
            area.y,
            flip,
            flip_style,
        );
    }
}

/// Settings panel drawn over the preview
struct SettingsOverlay<'a> {
    panel: &'a SettingsPanel,
}

impl Widget for SettingsOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = [
            " Settings ".to_string(),
            format!(" Camera: {}", self.panel.camera_name),
            format!(
                " (u) Autofocus: {}",
                if self.panel.autofocus { "on" } else { "off" }
            ),
            format!(" (c) Timer: {}", self.panel.timer.display_name()),
            format!(" Zoom: {:.1}", self.panel.zoom),
            format!(
                " Save to library: {}",
                if self.panel.save_to_library { "yes" } else { "no" }
            ),
            format!(" Library: {}", self.panel.library_dir.display()),
        ];

        let width = lines
            .iter()
            .map(|line| line.chars().count() as u16 + 2)
            .max()
            .unwrap_or(0)
            .min(area.width);
        let height = (lines.len() as u16).min(area.height);
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        let style = Style::default().fg(Color::White).bg(Color::Black);

        for (i, line) in lines.iter().take(usize::from(height)).enumerate() {
            let line_y = y + i as u16;
            for cx in x..x + width {
                if let Some(cell) = buf.cell_mut((cx, line_y)) {
                    cell.set_char(' ');
                    cell.set_style(style);
                }
            }
            let line_style = if i == 0 {
                style.add_modifier(Modifier::BOLD)
            } else {
                style
            };
            buf.set_stringn(x, line_y, line, usize::from(width), line_style);
        }
    }
}

/// Status bar widget
struct StatusBar {
    message: String,
    background: Color,
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        // Fill background
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(self.background);
            }
        }

        buf.set_stringn(
            area.x,
            area.y,
            &self.message,
            usize::from(area.width),
            Style::default().fg(Color::White).bg(self.background),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_preview_keeps_aspect_in_tall_area() {
        let area = Rect::new(0, 0, 40, 40);
        let (w, rows) = fit_preview(area, 0.5);
        assert_eq!(w, 40);
        assert_eq!(rows, 40);
    }

    #[test]
    fn test_fit_preview_fits_height_in_wide_area() {
        let area = Rect::new(0, 0, 200, 20);
        let (w, rows) = fit_preview(area, 0.75);
        assert_eq!(rows, 20);
        assert_eq!(w, 30);
    }

    #[test]
    fn test_fit_preview_empty_area() {
        assert_eq!(fit_preview(Rect::new(0, 0, 10, 0), 0.77), (0, 0));
    }
}
