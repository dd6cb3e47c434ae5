//! Terminal Rendering
//!
//! Turns view projections into text. The QR code is drawn with half-block
//! characters, two module rows per line.

use attendance::{IssuerView, RevealPhase, ScanView};
use qrcode::{Color, EcLevel, QrCode};

const MASK: char = '░';

/// Render `data` as a QR code (error correction level H)
pub fn qr(data: &str) -> anyhow::Result<String> {
    let code = QrCode::with_error_correction_level(data, EcLevel::H)?;
    let colors = code.to_colors();
    let width = code.width();

    let mut out = String::with_capacity((width + 1) * width.div_ceil(2));
    for y in (0..width).step_by(2) {
        for x in 0..width {
            let top = colors[y * width + x];
            let bottom = if y + 1 < width {
                colors[(y + 1) * width + x]
            } else {
                Color::Light
            };
            out.push(match (top, bottom) {
                (Color::Dark, Color::Dark) => '█',
                (Color::Dark, Color::Light) => '▀',
                (Color::Light, Color::Dark) => '▄',
                (Color::Light, Color::Light) => ' ',
            });
        }
        out.push('\n');
    }
    Ok(out)
}

/// Same footprint as the code, nothing readable
pub fn masked(rendered: &str) -> String {
    rendered
        .lines()
        .map(|line| MASK.to_string().repeat(line.chars().count()))
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = width * usize::from(percent.min(100)) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// One-line status under the code
pub fn issuer_status(view: &IssuerView) -> String {
    let class_id = view.class_id.as_deref().unwrap_or("-");
    let mut line = format!(
        "Session: {class_id}  {}  {}s {}",
        view.phase,
        view.countdown,
        progress_bar(view.progress_percent, 15)
    );
    if view.urgent {
        line.push_str("  !");
    }
    if let Some(left) = view.reveals_left {
        line.push_str(&format!("  reveals left: {left}"));
    }
    line
}

/// Full issuer screen: code (masked when blurred) plus status and hint
pub fn issuer_screen(view: &IssuerView) -> anyhow::Result<String> {
    let Some(payload) = view.payload.as_deref() else {
        return Ok("Enter a course code to start a session\n".to_string());
    };

    let code = qr(payload)?;
    let mut screen = if view.blurred { masked(&code) } else { code };
    screen.push_str(&issuer_status(view));
    screen.push('\n');
    if let Some(issued_at) = &view.issued_at {
        screen.push_str(&format!("Issued at {issued_at}\n"));
    }
    if let Some(hint) = view.hint {
        screen.push_str(hint);
        screen.push('\n');
    }
    if view.phase == RevealPhase::Visible || view.phase == RevealPhase::Revealed {
        screen.push_str(payload);
        screen.push('\n');
    }
    Ok(screen)
}

pub fn scan_screen(view: &ScanView) -> String {
    let mut screen = format!("== {} ==\n{}\n", view.title, view.message);
    if let Some(scanned_at) = &view.scanned_at {
        screen.push_str(&format!("{scanned_at}\n"));
    }
    if view.state == "capturing" && !view.capture_active {
        screen.push_str("Scanner paused\n");
    }
    screen.push_str(&format!("[{}]\n", view.action));
    screen
}
