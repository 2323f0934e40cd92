//! Level description data and the runtime tile grid
//!
//! A `LevelDescription` is the static, cell-granular table a level is
//! authored as. `LevelGrid` expands it once into pixel-space tiles and then
//! only tracks the two runtime mutations: question blocks being used up and
//! bricks being broken out of the active set.

use serde::{Deserialize, Serialize};

use super::layout;
use super::rect::Rect;
use super::state::EnemyKind;
use crate::consts::{LEVEL_COLUMNS, LEVEL_ROWS, PIPE_BASE_ROW, TILE_SIZE};

/// What a question block gives when struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reward {
    Coin,
    Mushroom,
}

/// A rectangle of cells: origin cell plus extent in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

/// A question block cell and its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCell {
    pub x: i32,
    pub y: i32,
    pub reward: Reward,
}

/// A pipe: left column plus height in cells, always two cells wide
///
/// Pipes always stand on the ground row, so the top row follows from the
/// height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipeStack {
    pub x: i32,
    pub height: u32,
}

impl PipeStack {
    /// Row of the pipe's top segment
    pub fn top_row(&self) -> i32 {
        PIPE_BASE_ROW - self.height as i32
    }
}

/// The flag pole: top cell plus height in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagPole {
    pub x: i32,
    pub y: i32,
    pub height: u32,
}

/// Where and what enemy appears at level start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub x: i32,
    pub y: i32,
}

/// Static level table, at grid-cell granularity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDescription {
    pub columns: u32,
    pub rows: u32,
    pub ground: Vec<CellRect>,
    pub bricks: Vec<CellRect>,
    pub questions: Vec<QuestionCell>,
    pub pipes: Vec<PipeStack>,
    /// Staircase blocks (solid, never breakable)
    pub stairs: Vec<Cell>,
    pub flag: Option<FlagPole>,
    pub enemies: Vec<EnemySpawn>,
}

impl Default for LevelDescription {
    fn default() -> Self {
        Self {
            columns: LEVEL_COLUMNS,
            rows: LEVEL_ROWS,
            ground: Vec::new(),
            bricks: Vec::new(),
            questions: Vec::new(),
            pipes: Vec::new(),
            stairs: Vec::new(),
            flag: None,
            enemies: Vec::new(),
        }
    }
}

impl LevelDescription {
    /// The single supplied layout
    pub fn world_1_1() -> Self {
        layout::world_1_1()
    }

    /// Parse a level table from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Level width in world pixels
    pub fn pixel_width(&self) -> f32 {
        self.columns as f32 * TILE_SIZE
    }

    /// Level height in world pixels
    pub fn pixel_height(&self) -> f32 {
        self.rows as f32 * TILE_SIZE
    }
}

/// Tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Ground,
    Brick,
    Question,
    UsedQuestion,
    PipeTop,
    PipeBody,
    FlagPole,
}

impl TileKind {
    /// Whether actors collide with this tile
    ///
    /// The flag pole is a goal marker: the player has to be able to reach
    /// its x to finish the level.
    pub fn is_solid(self) -> bool {
        self != TileKind::FlagPole
    }
}

/// A static obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: u32,
    pub kind: TileKind,
    pub rect: Rect,
    /// Bricks only: a big player can break it from below
    pub breakable: bool,
    /// Question blocks only
    pub reward: Option<Reward>,
    /// Question blocks only: already struck
    pub used: bool,
    /// Bricks only: pending removal from the active set
    pub broken: bool,
}

impl Tile {
    fn new(id: u32, kind: TileKind, rect: Rect) -> Self {
        Self {
            id,
            kind,
            rect,
            breakable: false,
            reward: None,
            used: false,
            broken: false,
        }
    }
}

/// All tiles of the running level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelGrid {
    tiles: Vec<Tile>,
    width: f32,
    height: f32,
}

impl LevelGrid {
    /// Expand a level table into individual tiles
    ///
    /// Ground and brick runs become one tile per cell, pipes one double-width
    /// tile per row, the flag pole one tall tile. A question block replaces
    /// any brick authored on the same cell.
    pub fn from_description(desc: &LevelDescription) -> Self {
        let mut tiles = Vec::new();

        for run in &desc.ground {
            for (col, row) in cells_of(run) {
                let rect = Rect::from_cells(col, row, 1, 1, TILE_SIZE);
                push_tile(&mut tiles, TileKind::Ground, rect);
            }
        }

        for run in &desc.bricks {
            for (col, row) in cells_of(run) {
                if desc.questions.iter().any(|q| q.x == col && q.y == row) {
                    continue;
                }
                let rect = Rect::from_cells(col, row, 1, 1, TILE_SIZE);
                let index = push_tile(&mut tiles, TileKind::Brick, rect);
                tiles[index].breakable = true;
            }
        }

        for question in &desc.questions {
            let rect = Rect::from_cells(question.x, question.y, 1, 1, TILE_SIZE);
            let index = push_tile(&mut tiles, TileKind::Question, rect);
            tiles[index].reward = Some(question.reward);
        }

        for pipe in &desc.pipes {
            for i in 0..pipe.height {
                let kind = if i == 0 { TileKind::PipeTop } else { TileKind::PipeBody };
                let rect = Rect::from_cells(pipe.x, pipe.top_row() + i as i32, 2, 1, TILE_SIZE);
                push_tile(&mut tiles, kind, rect);
            }
        }

        for stair in &desc.stairs {
            let rect = Rect::from_cells(stair.x, stair.y, 1, 1, TILE_SIZE);
            push_tile(&mut tiles, TileKind::Brick, rect);
        }

        if let Some(flag) = desc.flag {
            let rect = Rect::from_cells(flag.x, flag.y, 1, flag.height, TILE_SIZE);
            push_tile(&mut tiles, TileKind::FlagPole, rect);
        }

        log::info!(
            "Level grid built: {} tiles over {}x{} cells",
            tiles.len(),
            desc.columns,
            desc.rows
        );

        Self {
            tiles,
            width: desc.pixel_width(),
            height: desc.pixel_height(),
        }
    }

    /// Level width in world pixels
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Level height in world pixels
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Tile storage, in stable construction order
    ///
    /// Between `mark_broken` and `prune_broken` this still holds the broken
    /// bricks; outside a step it equals the active set.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tiles actors currently collide with or the presentation draws
    pub fn active_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| !t.broken)
    }

    /// Flag a breakable brick for removal. Returns false if it was not one.
    pub fn mark_broken(&mut self, index: usize) -> bool {
        match self.tiles.get_mut(index) {
            Some(tile) if tile.kind == TileKind::Brick && tile.breakable && !tile.broken => {
                tile.broken = true;
                log::debug!("Brick {} broken at ({}, {})", tile.id, tile.rect.x, tile.rect.y);
                true
            }
            _ => false,
        }
    }

    /// Use up a question block, switching it to `new_kind`
    ///
    /// Returns the reward the first time; struck again, nothing changes.
    pub fn mark_used(&mut self, index: usize, new_kind: TileKind) -> Option<Reward> {
        let tile = self.tiles.get_mut(index)?;
        if tile.kind != TileKind::Question || tile.used {
            return None;
        }
        tile.used = true;
        tile.kind = new_kind;
        log::debug!("Question block {} used: {:?}", tile.id, tile.reward);
        tile.reward
    }

    /// Drop broken bricks from the active set
    pub fn prune_broken(&mut self) {
        self.tiles.retain(|t| !t.broken);
    }

    /// The goal tile, if the level has one
    pub fn flag_pole(&self) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.kind == TileKind::FlagPole)
    }
}

/// Append a tile with the next id, returning its index
fn push_tile(tiles: &mut Vec<Tile>, kind: TileKind, rect: Rect) -> usize {
    let id = tiles.len() as u32 + 1;
    tiles.push(Tile::new(id, kind, rect));
    tiles.len() - 1
}

/// Every cell of a cell rectangle, column by column
fn cells_of(run: &CellRect) -> impl Iterator<Item = (i32, i32)> + '_ {
    (0..run.width as i32)
        .flat_map(move |i| (0..run.height as i32).map(move |j| (run.x + i, run.y + j)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_level() -> LevelDescription {
        LevelDescription {
            columns: 20,
            ground: vec![CellRect {
                x: 0,
                y: 13,
                width: 20,
                height: 2,
            }],
            bricks: vec![CellRect {
                x: 4,
                y: 9,
                width: 3,
                height: 1,
            }],
            questions: vec![QuestionCell {
                x: 5,
                y: 9,
                reward: Reward::Coin,
            }],
            pipes: vec![PipeStack { x: 10, height: 3 }],
            stairs: vec![Cell { x: 15, y: 12 }],
            flag: Some(FlagPole {
                x: 18,
                y: 3,
                height: 10,
            }),
            ..Default::default()
        }
    }

    fn index_of(grid: &LevelGrid, kind: TileKind) -> usize {
        grid.tiles().iter().position(|t| t.kind == kind).unwrap()
    }

    #[test]
    fn test_expansion_counts() {
        let grid = LevelGrid::from_description(&small_level());
        let count = |kind| grid.tiles().iter().filter(|t| t.kind == kind).count();
        assert_eq!(count(TileKind::Ground), 40);
        // Cell (5, 9) is a question block, not a brick
        assert_eq!(count(TileKind::Brick), 2 + 1);
        assert_eq!(count(TileKind::Question), 1);
        assert_eq!(count(TileKind::PipeTop), 1);
        assert_eq!(count(TileKind::PipeBody), 2);
        assert_eq!(count(TileKind::FlagPole), 1);
        assert_eq!(grid.width(), 640.0);
        assert_eq!(grid.height(), 480.0);
    }

    #[test]
    fn test_pipes_are_double_width_segments() {
        let grid = LevelGrid::from_description(&small_level());
        let segments: Vec<_> = grid
            .tiles()
            .iter()
            .filter(|t| matches!(t.kind, TileKind::PipeTop | TileKind::PipeBody))
            .collect();
        assert_eq!(segments[0].kind, TileKind::PipeTop);
        assert_eq!(segments[0].rect, Rect::new(320.0, 320.0, 64.0, 32.0));
        assert_eq!(segments[2].rect, Rect::new(320.0, 384.0, 64.0, 32.0));
    }

    #[test]
    fn test_stairs_are_unbreakable_bricks() {
        let mut grid = LevelGrid::from_description(&small_level());
        let stair = grid
            .tiles()
            .iter()
            .position(|t| t.kind == TileKind::Brick && !t.breakable)
            .unwrap();
        assert_eq!(grid.tiles()[stair].rect, Rect::new(480.0, 384.0, 32.0, 32.0));
        assert!(!grid.mark_broken(stair));
    }

    #[test]
    fn test_question_used_exactly_once() {
        let mut grid = LevelGrid::from_description(&small_level());
        let index = index_of(&grid, TileKind::Question);

        assert_eq!(grid.mark_used(index, TileKind::UsedQuestion), Some(Reward::Coin));
        assert_eq!(grid.tiles()[index].kind, TileKind::UsedQuestion);
        assert!(grid.tiles()[index].used);

        assert_eq!(grid.mark_used(index, TileKind::UsedQuestion), None);
        assert_eq!(grid.tiles()[index].kind, TileKind::UsedQuestion);
    }

    #[test]
    fn test_broken_brick_leaves_active_set() {
        let mut grid = LevelGrid::from_description(&small_level());
        let index = index_of(&grid, TileKind::Brick);
        let id = grid.tiles()[index].id;
        let before = grid.active_tiles().count();

        assert!(grid.mark_broken(index));
        assert!(!grid.mark_broken(index));
        assert_eq!(grid.active_tiles().count(), before - 1);

        grid.prune_broken();
        assert_eq!(grid.tiles().len(), before - 1);
        assert!(grid.tiles().iter().all(|t| t.id != id));
    }

    #[test]
    fn test_only_bricks_break() {
        let mut grid = LevelGrid::from_description(&small_level());
        let ground = index_of(&grid, TileKind::Ground);
        assert!(!grid.mark_broken(ground));
        assert!(!grid.mark_broken(10_000));
    }

    #[test]
    fn test_flag_pole_is_not_solid() {
        let grid = LevelGrid::from_description(&small_level());
        let flag = grid.flag_pole().unwrap();
        assert_eq!(flag.rect, Rect::new(576.0, 96.0, 32.0, 320.0));
        assert!(!flag.kind.is_solid());
        assert!(TileKind::Brick.is_solid());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "columns": 8,
            "ground": [{ "x": 0, "y": 13, "width": 8, "height": 2 }],
            "questions": [{ "x": 3, "y": 9, "reward": "mushroom" }],
            "enemies": [{ "kind": "shell_capable", "x": 6, "y": 12 }]
        }"#;
        let desc = LevelDescription::from_json(json).unwrap();
        assert_eq!(desc.columns, 8);
        assert_eq!(desc.rows, LEVEL_ROWS);
        assert_eq!(desc.questions[0].reward, Reward::Mushroom);
        assert_eq!(desc.enemies[0].kind, EnemyKind::ShellCapable);
        assert!(desc.flag.is_none());

        assert!(LevelDescription::from_json("{ \"columns\": \"wide\" }").is_err());
    }

    #[test]
    fn test_pipes_stand_on_ground_row_whatever_json_says() {
        let json = r#"{
            "columns": 8,
            "pipes": [{ "x": 2, "y": 4, "height": 2 }]
        }"#;
        let desc = LevelDescription::from_json(json).unwrap();
        let grid = LevelGrid::from_description(&desc);

        let top = &grid.tiles()[index_of(&grid, TileKind::PipeTop)];
        assert_eq!(top.rect, Rect::new(64.0, 352.0, 64.0, 32.0));
        let body = &grid.tiles()[index_of(&grid, TileKind::PipeBody)];
        assert_eq!(body.rect.bottom(), PIPE_BASE_ROW as f32 * TILE_SIZE);
    }
}
