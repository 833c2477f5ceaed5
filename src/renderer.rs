use rayon::{iter::ParallelIterator, slice::ParallelSliceMut};

use crate::config::RenderConfig;
use crate::geometry::{Point, Segment};
use crate::world::ObstacleSet;

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // 0RGB, the layout softbuffer expects
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: u32,
    pub obstacle: u32,
    pub ray: u32,
}

impl From<&RenderConfig> for Palette {
    fn from(cfg: &RenderConfig) -> Self {
        let [r, g, b] = cfg.background;
        let background = pack_rgb(r, g, b);
        let [r, g, b] = cfg.obstacle_color;
        let obstacle = pack_rgb(r, g, b);
        let [r, g, b] = cfg.ray_color;
        let ray = pack_rgb(r, g, b);
        Self {
            background,
            obstacle,
            ray,
        }
    }
}

/// CPU-side pixel buffer, row-major, copied to the window surface after drawing.
pub struct Frame {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0; width * height];
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Rows are filled in parallel
    pub fn clear(&mut self, color: u32) {
        if self.width == 0 {
            return;
        }
        self.pixels
            .par_chunks_mut(self.width)
            .for_each(|row| row.fill(color));
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }
}

/// Liang-Barsky clip of `seg` against `[0, max_x] x [0, max_y]`.
pub fn clip_to_rect(seg: &Segment, max_x: f32, max_y: f32) -> Option<Segment> {
    let a = seg.a;
    let dx = seg.b.x - a.x;
    let dy = seg.b.y - a.y;

    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    for (p, q) in [(-dx, a.x), (dx, max_x - a.x), (-dy, a.y), (dy, max_y - a.y)] {
        if p == 0.0 {
            // Parallel to this edge and outside it
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some(Segment::new(
        Point::new(a.x + t0 * dx, a.y + t0 * dy),
        Point::new(a.x + t1 * dx, a.y + t1 * dy),
    ))
}

/// Clip to the frame, then rasterize with integer Bresenham.
pub fn draw_segment(frame: &mut Frame, seg: &Segment, color: u32) {
    if frame.width == 0 || frame.height == 0 {
        return;
    }
    let max_x = (frame.width - 1) as f32;
    let max_y = (frame.height - 1) as f32;
    let Some(clipped) = clip_to_rect(seg, max_x, max_y) else {
        return;
    };

    let mut x0 = clipped.a.x.round() as i32;
    let mut y0 = clipped.a.y.round() as i32;
    let x1 = clipped.b.x.round() as i32;
    let y1 = clipped.b.y.round() as i32;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        frame.put(x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

pub fn render_frame(frame: &mut Frame, obstacles: &ObstacleSet, rays: &[Segment], palette: &Palette) {
    frame.clear(palette.background);

    for obstacle in obstacles {
        draw_segment(frame, obstacle, palette.obstacle);
    }
    for ray in rays {
        draw_segment(frame, ray, palette.ray);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const RED: u32 = 0x00FF_0000;

    fn lit(frame: &Frame, color: u32) -> usize {
        frame.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn test_pack_rgb() {
        assert_eq!(pack_rgb(0, 255, 0), 0x0000_FF00);
        assert_eq!(pack_rgb(0x12, 0x34, 0x56), 0x0012_3456);
    }

    #[test]
    fn test_clear() {
        let mut frame = Frame::new(7, 5);
        frame.clear(RED);
        assert_eq!(lit(&frame, RED), 35);
    }

    #[test]
    fn test_horizontal_line() {
        let mut frame = Frame::new(10, 10);
        draw_segment(&mut frame, &Segment::from_coords(2.0, 3.0, 6.0, 3.0), RED);
        assert_eq!(lit(&frame, RED), 5);
        for x in 2..=6 {
            assert_eq!(frame.get(x, 3), Some(RED));
        }
    }

    #[test]
    fn test_steep_line_is_connected() {
        let mut frame = Frame::new(10, 20);
        draw_segment(&mut frame, &Segment::from_coords(8.0, 1.0, 2.0, 18.0), RED);
        // One pixel per row for a steep line
        for y in 1..=18 {
            let row = (0..10).filter(|&x| frame.get(x, y) == Some(RED)).count();
            assert_eq!(row, 1, "row {y}");
        }
    }

    #[test]
    fn test_long_ray_is_clipped() {
        let mut frame = Frame::new(20, 10);
        draw_segment(&mut frame, &Segment::from_coords(5.0, 5.0, 3005.0, 5.0), RED);
        assert_eq!(lit(&frame, RED), 15);
        assert_eq!(frame.get(19, 5), Some(RED));
    }

    #[test]
    fn test_segment_outside_frame() {
        let mut frame = Frame::new(20, 10);
        draw_segment(&mut frame, &Segment::from_coords(30.0, -5.0, 50.0, 40.0), RED);
        draw_segment(&mut frame, &Segment::from_coords(-10.0, 3.0, -1.0, 3.0), RED);
        assert_eq!(lit(&frame, RED), 0);
    }

    #[test]
    fn test_clip_to_rect() {
        let seg = Segment::from_coords(-10.0, 5.0, 30.0, 5.0);
        let clipped = clip_to_rect(&seg, 19.0, 9.0).unwrap();
        assert_abs_diff_eq!(clipped.a.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(clipped.b.x, 19.0, epsilon = 1e-4);
        assert_eq!(clipped.a.y, 5.0);
        assert_eq!(clipped.b.y, 5.0);

        let inside = Segment::from_coords(1.0, 1.0, 4.0, 2.0);
        assert_eq!(clip_to_rect(&inside, 19.0, 9.0), Some(inside));

        assert_eq!(clip_to_rect(&Segment::from_coords(0.0, 12.0, 5.0, 12.0), 19.0, 9.0), None);
    }

    #[test]
    fn test_render_frame_draws_rays_over_obstacles() {
        let mut frame = Frame::new(20, 20);
        let obstacles = ObstacleSet::new(vec![Segment::from_coords(10.0, 0.0, 10.0, 19.0)]);
        let rays = vec![Segment::from_coords(0.0, 10.0, 19.0, 10.0)];
        let palette = Palette {
            background: 0,
            obstacle: 1,
            ray: 2,
        };
        render_frame(&mut frame, &obstacles, &rays, &palette);
        assert_eq!(frame.get(10, 10), Some(2));
        assert_eq!(frame.get(10, 0), Some(1));
        assert_eq!(frame.get(0, 0), Some(0));
    }

    #[test]
    fn test_resize_and_empty_frame() {
        let mut frame = Frame::new(4, 4);
        frame.resize(0, 0);
        frame.clear(RED);
        draw_segment(&mut frame, &Segment::from_coords(0.0, 0.0, 3.0, 3.0), RED);
        assert!(frame.pixels().is_empty());
    }
}
