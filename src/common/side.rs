//! Court sides and per-side storage.

use std::ops::{Index, IndexMut};

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// +1 for the left side (attacks toward +x), -1 for the right side.
    #[inline]
    pub fn attack_sign(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    /// Which half of the court `x` lies in. The net line itself counts as right.
    #[inline]
    pub fn of_x(x: f32, net_x: f32) -> Side {
        if x < net_x { Side::Left } else { Side::Right }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// One value per side, indexable by [`Side`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerSide<T> {
    pub left: T,
    pub right: T,
}

impl<T> PerSide<T> {
    pub const fn new(left: T, right: T) -> Self {
        Self { left, right }
    }
}

impl<T: Copy> PerSide<T> {
    pub const fn splat(v: T) -> Self {
        Self { left: v, right: v }
    }
}

impl<T> Index<Side> for PerSide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

impl<T> IndexMut<Side> for PerSide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}
