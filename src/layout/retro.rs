use serde_json::Value;

use crate::assets::color::Color;
use crate::assets::text::TextRun;
use crate::foundation::core::{Position, Size};
use crate::foundation::error::CardResult;
use crate::layout::paint::{add_image, add_text, load_scaled, shadow_color};
use crate::layout::style::{StyleDefaults, StyleTokens, TextStyle};
use crate::layout::{Layout, RenderContext};
use crate::raster::canvas::Raster;

pub const RETRO_ID: &str = "astats-retro";

const SIZE: Size = Size::new(300, 80);
const AVATAR_SIZE: i32 = 32;
const THUMB_SIZE: i32 = 22;
const THUMB_SLOTS: i32 = 5;
/// Horizontal pitch of a thumbnail slot: image, two border pixels and a margin.
const THUMB_PITCH: i32 = THUMB_SIZE + 2 + 1;

/// Fixed 300x80 statistics banner in the style of the AStats site.
///
/// Reads `steam.avatar`, `steam.name`, `steam.totalAchievements`, `steam.totalGamesPerfect`,
/// `astats.rank` and `achievements` (or `achievements.best`) from the data tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStatsRetro;

impl AStatsRetro {
    fn defaults() -> StyleDefaults {
        StyleDefaults {
            size: SIZE,
            background: "000000",
            text_color: "C8C8C8",
            font: "Helvetica Bold.ttf",
            font_size: 14,
            scheme: "000000",
        }
    }
}

impl Layout for AStatsRetro {
    fn id(&self) -> &str {
        RETRO_ID
    }

    #[tracing::instrument(skip(self, ctx), fields(layout = RETRO_ID))]
    fn draw(&self, ctx: &mut RenderContext<'_>) -> CardResult<Raster> {
        let style = StyleTokens::resolve(ctx.options, &Self::defaults());
        let mut canvas = Raster::new(SIZE, style.background_color);
        let mut pen = Pen {
            ctx,
            style: &style,
            canvas: &mut canvas,
        };

        if let Some(avatar) = pen.ctx.data.string("steam.avatar") {
            pen.image(&avatar, Position::new(260, 5), AVATAR_SIZE)?;
        }

        pen.text("AStats.nl", Position::new(4, 4), 14, Some(Color::rgb(0x8C, 0x8C, 0xFF)))?;
        if let Some(name) = pen.ctx.data.string("steam.name") {
            pen.text(&name, Position::new(4, 24), 14, Some(Color::rgb(0xFF, 0xFF, 0x00)))?;
        }

        pen.canvas
            .fill_rect(Position::new(10, 44), Size::new(281, 2), Color::rgb(0x64, 0x64, 0x64));

        let achievements = pen.ctx.data.string_or("steam.totalAchievements", "");
        pen.text(&format!("{achievements} Achievements"), Position::new(4, 49), 12, None)?;
        let perfect = pen.ctx.data.string_or("steam.totalGamesPerfect", "");
        pen.text(&format!("{perfect} Games 100%"), Position::new(4, 64), 12, None)?;

        let rank = pen.ctx.data.int_or("astats.rank", 0);
        let (label, x) = rank_label(rank);
        let text = format!("{label}{}", pen.ctx.data.string_or("astats.rank", ""));
        pen.text(&text, Position::new(x, 6), 12, Some(Color::rgb(0x42, 0xFF, 0xFF)))?;

        let thumbs: Vec<String> = achievement_images(pen.ctx.data.get("achievements"));
        for (i, reference) in thumbs.iter().enumerate().take(THUMB_SLOTS as usize) {
            let x = SIZE.w() - (THUMB_SLOTS - i as i32) * THUMB_PITCH - 2;
            let y = SIZE.h() - (THUMB_SIZE + 2) - 4;
            pen.image(reference, Position::new(x, y), THUMB_SIZE)?;
        }

        Ok(canvas)
    }
}

/// Rank wording and its x position: large ranks get the short label further right.
pub(crate) fn rank_label(rank: i64) -> (&'static str, i32) {
    match rank {
        r if r > 999 => ("Rank: ", 130),
        r if r > 99 => ("Worldwide rank: ", 97),
        _ => ("Worldwide rank: ", 105),
    }
}

/// Image references from `achievements`, or from its `best` list when present.
fn achievement_images(achievements: Option<&Value>) -> Vec<String> {
    let list = match achievements {
        Some(Value::Object(map)) => match map.get("best") {
            Some(Value::Array(best)) => best.as_slice(),
            _ => &[],
        },
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    };
    list.iter()
        .filter_map(|a| a.get("image")?.as_str().map(str::to_owned))
        .collect()
}

struct Pen<'p, 'c> {
    ctx: &'p mut RenderContext<'c>,
    style: &'p StyleTokens,
    canvas: &'p mut Raster,
}

impl Pen<'_, '_> {
    fn text(&mut self, text: &str, at: Position, size: i32, color: Option<Color>) -> CardResult<()> {
        let TextStyle { font, shadow, .. } = &self.style.text;
        let run = TextRun::new(text, font, size as f32);
        let color = color.unwrap_or(self.style.text.color);
        let shadow = shadow_color(*shadow, self.style.scheme);
        add_text(self.ctx.text, self.canvas, &run, color, at, shadow)
    }

    fn image(&mut self, reference: &str, at: Position, height: i32) -> CardResult<()> {
        if let Some(image) = load_scaled(self.ctx.assets, reference, height)? {
            add_image(self.canvas, &image, at, false);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/retro.rs"]
mod tests;
