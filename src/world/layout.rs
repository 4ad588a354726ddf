//! Office floor plan in office pixels (origin top-left, y down) and the
//! conversions to Bevy world space (origin centre, y up).
use bevy::{math::Rect, prelude::*};

use crate::minigame::bug_hunt::server_door_point;

pub const WALL_THICKNESS: f32 = 8.0;
pub const DOOR_HEIGHT: f32 = 72.0;
const SIDE_ROOM_WIDTH: f32 = 0.25;
const SIDE_ROOM_HEIGHT: f32 = 0.35;
/// Server room door sits 60% of the way down its left wall.
const SERVER_DOOR_FRACTION: f32 = 0.6;

const DESK_SIZE: Vec2 = Vec2::new(128.0, 64.0);
const CHAIR_SIZE: Vec2 = Vec2::new(36.0, 36.0);
const CHAIR_OFFSET: f32 = 64.0;
const RACK_SIZE: Vec2 = Vec2::new(56.0, 96.0);
const RACK_GAP: Vec2 = Vec2::new(50.0, 30.0);
const RACK_INSET: f32 = 50.0;
const PLAYER_START_OFFSET: Vec2 = Vec2::new(-180.0, 40.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Wall,
    Desk,
    Chair,
    Rack,
}

/// One solid piece of the office. `collider` can be tighter than the drawn
/// `rect` so the player can walk up close to furniture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPiece {
    pub kind: PieceKind,
    pub rect: Rect,
    pub collider: Rect,
}

impl LayoutPiece {
    fn wall(rect: Rect) -> Self {
        Self {
            kind: PieceKind::Wall,
            rect,
            collider: rect,
        }
    }

    fn furniture(kind: PieceKind, center: Vec2, size: Vec2, collider_scale: Vec2) -> Self {
        Self {
            kind,
            rect: Rect::from_center_size(center, size),
            collider: Rect::from_center_size(center, size * collider_scale),
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OfficeLayout {
    size: Vec2,
}

impl OfficeLayout {
    pub fn new(size: Vec2) -> Self {
        Self { size }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Anchor for the central desk and the NPC ring.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.size.x * 0.5).round(),
            (self.size.y * 0.55).round(),
        )
    }

    pub fn player_start(&self) -> Vec2 {
        self.center() + PLAYER_START_OFFSET
    }

    fn side_room_size(&self) -> Vec2 {
        Vec2::new(
            (self.size.x * SIDE_ROOM_WIDTH).floor(),
            (self.size.y * SIDE_ROOM_HEIGHT).floor(),
        )
    }

    /// Bottom-left room with a door in its right wall.
    pub fn ceo_office(&self) -> Rect {
        let room = self.side_room_size();
        Rect::new(0.0, self.size.y - room.y, room.x, self.size.y)
    }

    /// Top-right room with a door in its left wall.
    pub fn server_room(&self) -> Rect {
        let room = self.side_room_size();
        Rect::new(self.size.x - room.x, 0.0, self.size.x, room.y)
    }

    pub fn ceo_door_y(&self) -> f32 {
        let room = self.ceo_office();
        room.min.y + (room.height() / 2.0).floor()
    }

    pub fn server_door_y(&self) -> f32 {
        let room = self.server_room();
        room.min.y + (room.height() * SERVER_DOOR_FRACTION).floor()
    }

    /// Where invading bugs are headed.
    pub fn server_door_point(&self) -> Vec2 {
        server_door_point(self.size)
    }

    /// Every wall segment and piece of furniture.
    pub fn pieces(&self) -> Vec<LayoutPiece> {
        let mut pieces = vec![LayoutPiece::furniture(
            PieceKind::Desk,
            self.center(),
            DESK_SIZE,
            Vec2::new(0.8, 0.6),
        )];

        let ceo = self.ceo_office();
        pieces.extend(
            closed_walls(ceo, Side::Right)
                .into_iter()
                .chain(split_wall(ceo.max.x - WALL_THICKNESS, ceo, self.ceo_door_y()))
                .map(LayoutPiece::wall),
        );
        let desk = ceo.center();
        pieces.push(LayoutPiece::furniture(
            PieceKind::Desk,
            desk,
            DESK_SIZE,
            Vec2::new(0.8, 0.6),
        ));
        pieces.push(LayoutPiece::furniture(
            PieceKind::Chair,
            desk + Vec2::new(CHAIR_OFFSET, 0.0),
            CHAIR_SIZE,
            Vec2::splat(0.7),
        ));

        let server = self.server_room();
        pieces.extend(
            closed_walls(server, Side::Left)
                .into_iter()
                .chain(split_wall(server.min.x, server, self.server_door_y()))
                .map(LayoutPiece::wall),
        );
        let first_rack = server.min + Vec2::splat(RACK_INSET);
        for row in 0..2 {
            for col in 0..2 {
                let offset = Vec2::new(
                    col as f32 * (RACK_SIZE.x + RACK_GAP.x),
                    row as f32 * (RACK_SIZE.y + RACK_GAP.y),
                );
                pieces.push(LayoutPiece::furniture(
                    PieceKind::Rack,
                    first_rack + offset,
                    RACK_SIZE,
                    Vec2::ONE,
                ));
            }
        }

        pieces
    }

    pub fn to_world(&self, office: Vec2) -> Vec2 {
        Vec2::new(office.x - self.size.x / 2.0, self.size.y / 2.0 - office.y)
    }

    pub fn to_office(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.size.x / 2.0, self.size.y / 2.0 - world.y)
    }

    pub fn rect_to_world(&self, rect: Rect) -> Rect {
        Rect::from_corners(self.to_world(rect.min), self.to_world(rect.max))
    }

    /// Room bounds in world space.
    pub fn world_bounds(&self) -> Rect {
        Rect::from_center_size(Vec2::ZERO, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Top, bottom and the full-height wall opposite `door_side`.
fn closed_walls(room: Rect, door_side: Side) -> [Rect; 3] {
    let top = Rect::new(room.min.x, room.min.y, room.max.x, room.min.y + WALL_THICKNESS);
    let bottom = Rect::new(room.min.x, room.max.y - WALL_THICKNESS, room.max.x, room.max.y);
    let side = match door_side {
        Side::Right => Rect::new(room.min.x, room.min.y, room.min.x + WALL_THICKNESS, room.max.y),
        Side::Left => Rect::new(room.max.x - WALL_THICKNESS, room.min.y, room.max.x, room.max.y),
    };
    [top, bottom, side]
}

/// Vertical wall at `x` with a door gap centred on `door_y`.
fn split_wall(x: f32, room: Rect, door_y: f32) -> Vec<Rect> {
    let gap_top = door_y - DOOR_HEIGHT / 2.0;
    let gap_bottom = door_y + DOOR_HEIGHT / 2.0;
    let mut segments = Vec::with_capacity(2);
    if gap_top > room.min.y {
        segments.push(Rect::new(x, room.min.y, x + WALL_THICKNESS, gap_top));
    }
    if room.max.y > gap_bottom {
        segments.push(Rect::new(x, gap_bottom, x + WALL_THICKNESS, room.max.y));
    }
    segments
}
