use serde::{Deserialize, Serialize};

use crate::*;

pub const OPAQUE: u8 = u8::MAX;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    White,
}

impl TokenColor {
    pub const ALL: [TokenColor; 7] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Purple,
        Self::White,
    ];

    pub const fn label(self) -> char {
        use TokenColor::*;
        match self {
            Red => 'R',
            Orange => 'O',
            Yellow => 'Y',
            Green => 'G',
            Blue => 'B',
            Purple => 'P',
            White => 'W',
        }
    }

    pub const fn from_label(label: char) -> Option<Self> {
        use TokenColor::*;
        Some(match label {
            'R' => Red,
            'O' => Orange,
            'Y' => Yellow,
            'G' => Green,
            'B' => Blue,
            'P' => Purple,
            'W' => White,
            _ => return None,
        })
    }
}

/// What a token shows and how it behaves: a plain gem or a bomb.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Gem(TokenColor),
    Bomb,
}

impl Face {
    pub const BOMB_LABEL: char = '*';

    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::Bomb)
    }

    pub const fn label(self) -> char {
        match self {
            Self::Gem(color) => color.label(),
            Self::Bomb => Self::BOMB_LABEL,
        }
    }

    pub const fn from_label(label: char) -> Option<Self> {
        if label == Self::BOMB_LABEL {
            return Some(Self::Bomb);
        }
        match TokenColor::from_label(label) {
            Some(color) => Some(Self::Gem(color)),
            None => None,
        }
    }
}

impl From<TokenColor> for Face {
    fn from(color: TokenColor) -> Self {
        Self::Gem(color)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
    /// Freshly refilled, not yet seen by a waiting tick
    New,
    Idle,
    Selected,
    Match,
    Deleting,
    Deleted,
}

impl TokenStatus {
    /// Statuses that take part in matching even when their neighbors are busy.
    pub const fn is_matchable(self) -> bool {
        matches!(self, Self::Idle | Self::Match)
    }
}

impl Default for TokenStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// What a token reports after one frame of animation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenStep {
    Moving,
    Status(TokenStatus),
}

impl TokenStep {
    /// Whether the token still needs frames before game logic may continue.
    pub const fn is_busy(self) -> bool {
        matches!(
            self,
            Self::Moving | Self::Status(TokenStatus::Deleting)
        )
    }
}

/// Pixel geometry and animation speeds shared by all tokens.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenMetrics {
    pub size: Vec2,
    pub padding: f32,
    /// Offset of the board's top-left corner on screen
    pub margin: Vec2,
    /// Pixels travelled per frame on each axis
    pub move_step: f32,
    /// Alpha lost per frame while fading out
    pub fade_step: u8,
}

impl TokenMetrics {
    pub fn slot_origin(&self, (col, row): Coord2) -> Vec2 {
        Vec2::new(
            f32::from(col) * self.size.x,
            f32::from(row) * self.size.y,
        )
    }

    /// Center of a slot in screen space, handy for synthesizing clicks.
    pub fn slot_center(&self, coords: Coord2) -> Vec2 {
        self.margin + self.slot_origin(coords) + Vec2::new(self.size.x / 2.0, self.size.y / 2.0)
    }
}

impl Default for TokenMetrics {
    fn default() -> Self {
        Self {
            size: Vec2::new(64.0, 64.0),
            padding: 4.0,
            margin: Vec2::ZERO,
            move_step: 8.0,
            fade_step: 15,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Token {
    col: Coord,
    row: Coord,
    position: Vec2,
    target: Vec2,
    face: Face,
    status: TokenStatus,
    hinted: bool,
    alpha: u8,
}

impl Token {
    pub fn new(coords: Coord2, face: Face, status: TokenStatus, metrics: &TokenMetrics) -> Self {
        let origin = metrics.slot_origin(coords);
        Self {
            col: coords.0,
            row: coords.1,
            position: origin,
            target: origin,
            face,
            status,
            hinted: false,
            alpha: OPAQUE,
        }
    }

    pub fn coords(&self) -> Coord2 {
        (self.col, self.row)
    }

    pub fn col(&self) -> Coord {
        self.col
    }

    pub fn row(&self) -> Coord {
        self.row
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn status(&self) -> TokenStatus {
        self.status
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn is_hinted(&self) -> bool {
        self.hinted
    }

    pub fn is_bomb(&self) -> bool {
        self.face.is_bomb()
    }

    pub fn set_status(&mut self, status: TokenStatus) {
        if self.status == TokenStatus::Deleted {
            return;
        }
        self.status = status;
    }

    pub(crate) fn set_face(&mut self, face: Face) {
        self.face = face;
    }

    pub(crate) fn set_hinted(&mut self, hinted: bool) {
        self.hinted = hinted;
    }

    pub fn draw_position(&self, metrics: &TokenMetrics) -> Vec2 {
        metrics.margin + self.position
    }

    pub fn hit_test(&self, point: Vec2, metrics: &TokenMetrics) -> bool {
        let top_left = self.draw_position(metrics);
        let left = top_left.x + metrics.padding;
        let top = top_left.y + metrics.padding;
        let right = top_left.x + metrics.size.x - metrics.padding;
        let bottom = top_left.y + metrics.size.y - metrics.padding;
        point.x >= left && point.x < right && point.y >= top && point.y < bottom
    }

    /// Trades slot bookkeeping with `other`; each keeps its current position and
    /// animates toward the slot the other one used to own.
    pub fn swap_targets(&mut self, other: &mut Token) {
        core::mem::swap(&mut self.col, &mut other.col);
        core::mem::swap(&mut self.row, &mut other.row);
        core::mem::swap(&mut self.target, &mut other.target);
    }

    pub fn advance(&mut self, metrics: &TokenMetrics) -> TokenStep {
        use TokenStatus::*;

        match self.status {
            Match => {
                self.status = Deleting;
                TokenStep::Status(Deleting)
            }
            Deleting => {
                self.alpha = self.alpha.saturating_sub(metrics.fade_step);
                if self.alpha == 0 {
                    self.status = Deleted;
                }
                TokenStep::Status(self.status)
            }
            status => {
                if self.position != self.target {
                    self.position = self.position.step_toward(self.target, metrics.move_step);
                    if self.position != self.target {
                        return TokenStep::Moving;
                    }
                }
                TokenStep::Status(status)
            }
        }
    }
}
