use std::io::Cursor;

use image::{ImageOutputFormat, RgbaImage};
use log::debug;
use tiny_skia::{FillRule, Paint, Path, Pixmap, Stroke, Transform};

use crate::error::IconError;
use crate::geometry::{self, scaled};

type Rgba = [u8; 4];

const PANEL: Rgba = [20, 25, 45, 255];
const BORDER: Rgba = [60, 130, 255, 80];
const SHIELD_FILL: Rgba = [30, 100, 220, 200];
const SHIELD_OUTLINE: Rgba = [100, 180, 255, 255];
const HIGHLIGHT: Rgba = [40, 120, 240, 150];
const SIGNAL: Rgba = [255, 255, 255, 220];
const SIGNAL_DOT: Rgba = [255, 255, 255, 240];
const KEY: Rgba = [255, 200, 50, 255];

const SIGNAL_START_DEG: f32 = 220.0;
const SIGNAL_END_DEG: f32 = 320.0;
const HIGHLIGHT_SCALE: f32 = 0.82;

/// Pixel measurements of every element of the icon, derived from the edge
/// length alone.
#[derive(Debug, Clone, PartialEq)]
pub struct IconLayout {
    pub size: i32,
    pub margin: i32,
    pub corner: i32,
    pub inner_margin: i32,
    pub inner_corner: i32,
    pub border_width: i32,
    pub cx: i32,
    pub cy: i32,
    pub shield_w: i32,
    pub shield_h: i32,
    pub shield_top: i32,
    pub wifi_cx: i32,
    pub wifi_cy: i32,
    pub signal_radii: [i32; 3],
    pub signal_width: i32,
    pub dot_cy: i32,
    pub dot_r: i32,
    pub key_cx: i32,
    pub key_cy: i32,
    pub key_r: i32,
    pub key_width: i32,
    pub handle_end: (i32, i32),
}

impl IconLayout {
    pub fn new(size: u32) -> Self {
        let s = size as i32;
        let margin = scaled(size, 0.06);
        let corner = scaled(size, 0.22);
        let inset = scaled(size, 0.02);
        let (cx, cy) = (s / 2, s / 2);
        let shield_w = scaled(size, 0.50);
        let shield_h = scaled(size, 0.58);
        let wifi_cy = cy - inset;
        let key_cx = cx + scaled(size, 0.10);
        let key_cy = cy + scaled(size, 0.14);
        let handle = scaled(size, 0.07);

        Self {
            size: s,
            margin,
            corner,
            inner_margin: margin + inset,
            inner_corner: corner - inset,
            border_width: scaled(size, 0.005).max(1),
            cx,
            cy,
            shield_w,
            shield_h,
            shield_top: cy - (shield_h as f64 * 0.45) as i32,
            wifi_cx: cx,
            wifi_cy,
            signal_radii: [
                scaled(size, 0.10),
                scaled(size, 0.18),
                scaled(size, 0.26),
            ],
            signal_width: scaled(size, 0.025).max(2),
            dot_cy: wifi_cy + inset,
            dot_r: scaled(size, 0.025).max(2),
            key_cx,
            key_cy,
            key_r: scaled(size, 0.04).max(2),
            key_width: scaled(size, 0.015).max(1),
            handle_end: (key_cx + handle, key_cy + handle),
        }
    }

    /// Apex, upper right, lower right, bottom tip, lower left, upper left.
    pub fn shield_points(&self) -> [(f32, f32); 6] {
        let h = self.shield_h as f64;
        let half_w = self.shield_w / 2;
        let shoulder = self.shield_top + (h * 0.15) as i32;
        let flank = self.shield_top + (h * 0.55) as i32;
        [
            (self.cx, self.shield_top),
            (self.cx + half_w, shoulder),
            (self.cx + half_w, flank),
            (self.cx, self.shield_top + self.shield_h),
            (self.cx - half_w, flank),
            (self.cx - half_w, shoulder),
        ]
        .map(|(x, y)| (x as f32, y as f32))
    }

    /// Shield outline shrunk towards its apex and pushed down a little.
    pub fn highlight_points(&self) -> [(f32, f32); 6] {
        let (cx, top) = (self.cx as f32, self.shield_top as f32);
        let shift = (self.shield_h as f64 * 0.05) as i32 as f32;
        self.shield_points().map(|(x, y)| {
            (
                cx + (x - cx) * HIGHLIGHT_SCALE,
                top + (y - top) * HIGHLIGHT_SCALE + shift,
            )
        })
    }
}

fn paint(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    let [r, g, b, a] = color;
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn fill(pixmap: &mut Pixmap, path: Option<Path>, color: Rgba) {
    if let Some(path) = path {
        pixmap.fill_path(&path, &paint(color), FillRule::Winding, Transform::identity(), None);
    }
}

fn stroke(pixmap: &mut Pixmap, path: Option<Path>, color: Rgba, width: f32) {
    if let Some(path) = path {
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
    }
}

/// Draws the shield-and-wifi icon on a transparent `size`×`size` canvas.
///
/// Layers, bottom to top: navy panel, inset border, shield, highlight,
/// signal arcs, signal dot, key ring, key handle. Outlines are kept inside
/// the shape they trace.
pub fn render_icon(size: u32) -> Result<RgbaImage, IconError> {
    if size == 0 {
        return Err(IconError::ZeroSize);
    }
    let mut pixmap = Pixmap::new(size, size).ok_or(IconError::Canvas { size })?;
    let l = IconLayout::new(size);
    let s = l.size as f32;

    let m = l.margin as f32;
    fill(
        &mut pixmap,
        geometry::rounded_rect(m, m, s - m, s - m, l.corner as f32),
        PANEL,
    );

    let bw = l.border_width as f32;
    let im = l.inner_margin as f32 + bw / 2.0;
    stroke(
        &mut pixmap,
        geometry::rounded_rect(im, im, s - im, s - im, l.inner_corner as f32 - bw / 2.0),
        BORDER,
        bw,
    );

    let shield = l.shield_points();
    fill(&mut pixmap, geometry::polygon(&shield), SHIELD_FILL);
    stroke(&mut pixmap, geometry::polygon(&shield), SHIELD_OUTLINE, 1.0);
    fill(&mut pixmap, geometry::polygon(&l.highlight_points()), HIGHLIGHT);

    let (wx, wy) = (l.wifi_cx as f32, l.wifi_cy as f32);
    let sw = l.signal_width as f32;
    for r in l.signal_radii {
        stroke(
            &mut pixmap,
            geometry::arc(wx, wy, r as f32 - sw / 2.0, SIGNAL_START_DEG, SIGNAL_END_DEG),
            SIGNAL,
            sw,
        );
    }
    fill(
        &mut pixmap,
        geometry::circle(wx, l.dot_cy as f32, l.dot_r as f32),
        SIGNAL_DOT,
    );

    let (kx, ky, kr) = (l.key_cx as f32, l.key_cy as f32, l.key_r as f32);
    let kw = l.key_width as f32;
    stroke(&mut pixmap, geometry::circle(kx, ky, kr - kw / 2.0), KEY, kw);
    let (hx, hy) = l.handle_end;
    stroke(
        &mut pixmap,
        geometry::line(kx + kr, ky + kr, hx as f32, hy as f32),
        KEY,
        kw,
    );

    debug!("rendered {}x{} icon", size, size);
    into_rgba_image(&pixmap)
}

// tiny-skia stores premultiplied alpha; PNG wants straight alpha.
fn into_rgba_image(pixmap: &Pixmap) -> Result<RgbaImage, IconError> {
    let raw: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), raw).ok_or(IconError::Canvas {
        size: pixmap.width(),
    })
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, IconError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
    Ok(bytes)
}
