use tiny_skia::{Path, PathBuilder, Rect};

/// Whole-pixel length `trunc(size * k)`, computed in double precision.
pub fn scaled(size: u32, k: f64) -> i32 {
    (size as f64 * k) as i32
}

/// Point on a circle at `deg` degrees. Screen convention: 0° on +x and,
/// since y grows downwards, angles sweep clockwise.
pub fn arc_point(cx: f32, cy: f32, r: f32, deg: f32) -> (f32, f32) {
    let rad = deg.to_radians();
    (cx + r * rad.cos(), cy + r * rad.sin())
}

// Appends an arc as cubic segments of at most 90° each. With `connect` the
// arc is joined to the current point by a line, otherwise a new contour
// is started.
fn push_arc(pb: &mut PathBuilder, cx: f32, cy: f32, r: f32, start: f32, end: f32, connect: bool) {
    let (x0, y0) = arc_point(cx, cy, r, start);
    if connect {
        pb.line_to(x0, y0);
    } else {
        pb.move_to(x0, y0);
    }

    let sweep = end - start;
    let segments = (sweep.abs() / 90.0).ceil().max(1.0) as usize;
    let step = sweep / segments as f32;
    // tangent length for a cubic approximating `step` degrees of arc
    let k = 4.0 / 3.0 * (step.to_radians() / 4.0).tan() * r;

    let mut a0 = start;
    for _ in 0..segments {
        let a1 = a0 + step;
        let (r0, r1) = (a0.to_radians(), a1.to_radians());
        let (px, py) = arc_point(cx, cy, r, a0);
        let (qx, qy) = arc_point(cx, cy, r, a1);
        pb.cubic_to(
            px - k * r0.sin(),
            py + k * r0.cos(),
            qx + k * r1.sin(),
            qy - k * r1.cos(),
            qx,
            qy,
        );
        a0 = a1;
    }
}

/// Open arc from `start` to `end` degrees.
pub fn arc(cx: f32, cy: f32, r: f32, start: f32, end: f32) -> Option<Path> {
    if r <= 0.0 {
        return None;
    }
    let mut pb = PathBuilder::new();
    push_arc(&mut pb, cx, cy, r, start, end, false);
    pb.finish()
}

pub fn circle(cx: f32, cy: f32, r: f32) -> Option<Path> {
    if r <= 0.0 {
        return None;
    }
    PathBuilder::from_circle(cx, cy, r)
}

/// Rectangle spanning `x0..x1`, `y0..y1` with corners of radius `r`.
/// The radius is clamped to half the shorter side.
pub fn rounded_rect(x0: f32, y0: f32, x1: f32, y1: f32, r: f32) -> Option<Path> {
    let (w, h) = (x1 - x0, y1 - y0);
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let r = r.min(w / 2.0).min(h / 2.0);
    if r <= 0.0 {
        return Rect::from_ltrb(x0, y0, x1, y1).map(PathBuilder::from_rect);
    }

    let mut pb = PathBuilder::new();
    pb.move_to(x0 + r, y0);
    push_arc(&mut pb, x1 - r, y0 + r, r, 270.0, 360.0, true);
    push_arc(&mut pb, x1 - r, y1 - r, r, 0.0, 90.0, true);
    push_arc(&mut pb, x0 + r, y1 - r, r, 90.0, 180.0, true);
    push_arc(&mut pb, x0 + r, y0 + r, r, 180.0, 270.0, true);
    pb.close();
    pb.finish()
}

pub fn polygon(points: &[(f32, f32)]) -> Option<Path> {
    let (&(x, y), rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(x, y);
    for &(x, y) in rest {
        pb.line_to(x, y);
    }
    pb.close();
    pb.finish()
}

pub fn line(x0: f32, y0: f32, x1: f32, y1: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(x0, y0);
    pb.line_to(x1, y1);
    pb.finish()
}
