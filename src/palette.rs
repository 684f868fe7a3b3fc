use crossterm::style::Color;
use rand::seq::SliceRandom;
use rand::Rng;

pub const HEAD_COLOR: Color = Color::Rgb { r: 255, g: 0, b: 0 };
pub const DEAD_COLOR: Color = Color::DarkGrey;

/// Apple colors. Each eaten apple passes its color on to the snake's new tail segment.
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new() -> Self {
        let levels: Vec<u8> = (50..206).step_by(20).collect();

        let mut colors = Vec::with_capacity(levels.len().pow(3));
        for &r in &levels {
            for &g in &levels {
                for &b in &levels {
                    colors.push(Color::Rgb { r, g, b });
                }
            }
        }

        Palette { colors }
    }

    pub fn pick<R: Rng>(&self, rng: &mut R) -> Color {
        self.colors.choose(rng).copied().unwrap_or(HEAD_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_covers_the_mid_range() {
        let palette = Palette::new();
        assert_eq!(palette.colors.len(), 512);
        assert!(palette.colors.contains(&Color::Rgb { r: 50, g: 50, b: 50 }));
        assert!(palette.colors.contains(&Color::Rgb { r: 190, g: 190, b: 190 }));
        assert!(!palette.colors.contains(&HEAD_COLOR));
    }
}
