//! PNG card rendering for repository statistics
//!
//! Lays out the labeled metrics on a fixed-width card: one 40px row per
//! metric, or two rows when the rendered text would overflow the card.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use repocard_core::{CardError, ErrorContext, RenderConfig, RepoStats};

const CARD_WIDTH: u32 = 500;
const LINE_HEIGHT: u32 = 40;
/// Rows wider than this wrap the value onto its own line
const WRAP_WIDTH: u32 = 440;
const MARGIN_X: i32 = 30;
const TITLE: &str = "REPOSITORY STATS";

/// Resolve a usable font family, falling back to sans-serif.
///
/// Returns the family that measured successfully, or a typed render error
/// when neither the configured family nor the fallback is usable.
pub fn resolve_font(config: &RenderConfig) -> Result<String, CardError> {
    for family in [config.font_family.as_str(), "sans-serif"] {
        let font: FontDesc = (family, config.font_size as f64).into_font();
        if font.layout_box("Ag").is_ok() {
            return Ok(family.to_string());
        }
    }

    Err(CardError::Render {
        message: format!(
            "no usable font: tried '{}' and the sans-serif fallback",
            config.font_family
        ),
        source: None,
        context: ErrorContext::new("render")
            .with_operation("resolve_font")
            .with_suggestion("Install a system font or change render.font_family"),
    })
}

fn text_width(font: &FontDesc, text: &str) -> Result<u32, CardError> {
    let ((min_x, _), (max_x, _)) = font.layout_box(text).map_err(|e| CardError::Render {
        message: format!("failed to measure text: {}", e),
        source: None,
        context: ErrorContext::new("render").with_operation("text_width"),
    })?;
    Ok((max_x - min_x).max(0) as u32)
}

fn draw_err<E: std::fmt::Display>(e: E) -> CardError {
    CardError::Render {
        message: format!("drawing failed: {}", e),
        source: None,
        context: ErrorContext::new("render").with_operation("render_stats_card"),
    }
}

/// Render a statistics card as PNG bytes
pub fn render_stats_card(stats: &RepoStats, config: &RenderConfig) -> Result<Vec<u8>, CardError> {
    let family = resolve_font(config)?;
    let font: FontDesc = (family.as_str(), config.font_size as f64).into_font();

    let entries = stats.labeled();

    // Measure every row first to size the card.
    let mut height = 80u32;
    let mut wrapped = Vec::with_capacity(entries.len());
    for (label, value) in &entries {
        let wide = text_width(&font, &format!("{}: {}", label, value))? > WRAP_WIDTH;
        wrapped.push(wide);
        height += if wide { LINE_HEIGHT * 2 } else { LINE_HEIGHT };
    }

    let mut frame = vec![0u8; (CARD_WIDTH * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut frame, (CARD_WIDTH, height)).into_drawing_area();
        root.fill(&BLACK).map_err(draw_err)?;

        let title_style = font
            .clone()
            .color(&RED)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            TITLE,
            (CARD_WIDTH as i32 / 2, 30),
            title_style,
        ))
        .map_err(draw_err)?;

        let label_style = font.clone().color(&YELLOW);
        let value_style = font.clone().color(&WHITE);

        let mut y = 70i32;
        for ((label, value), wide) in entries.iter().zip(&wrapped) {
            let key = format!("{}:", label);
            if *wide {
                root.draw(&Text::new(key, (MARGIN_X, y), label_style.clone()))
                    .map_err(draw_err)?;
                root.draw(&Text::new(
                    value.clone(),
                    (MARGIN_X, y + 25),
                    value_style.clone(),
                ))
                .map_err(draw_err)?;
                y += (LINE_HEIGHT * 2) as i32;
            } else {
                let key_width = text_width(&font, &key)? as i32;
                root.draw(&Text::new(key, (MARGIN_X, y), label_style.clone()))
                    .map_err(draw_err)?;
                root.draw(&Text::new(
                    format!(" {}", value),
                    (MARGIN_X + key_width, y),
                    value_style.clone(),
                ))
                .map_err(draw_err)?;
                y += LINE_HEIGHT as i32;
            }
        }

        root.present().map_err(draw_err)?;
    }

    encode_png(&frame, CARD_WIDTH, height)
}

fn encode_png(frame: &[u8], width: u32, height: u32) -> Result<Vec<u8>, CardError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(frame, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| CardError::Render {
            message: format!("PNG encoding failed: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("render").with_operation("encode_png"),
        })?;
    Ok(png)
}
