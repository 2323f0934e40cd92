//! World 1-1 layout table
//!
//! Cell coordinates: 212 columns by 15 rows, ground on rows 13-14.

use super::level::{
    Cell, CellRect, EnemySpawn, FlagPole, LevelDescription, PipeStack, QuestionCell, Reward,
};
use super::state::EnemyKind;
use crate::consts::{LEVEL_COLUMNS, LEVEL_ROWS};

const fn run(x: i32, y: i32, width: u32, height: u32) -> CellRect {
    CellRect {
        x,
        y,
        width,
        height,
    }
}

const fn question(x: i32, y: i32, reward: Reward) -> QuestionCell {
    QuestionCell { x, y, reward }
}

const fn pipe(x: i32, height: u32) -> PipeStack {
    PipeStack { x, height }
}

const fn cell(x: i32, y: i32) -> Cell {
    Cell { x, y }
}

const fn patrol(x: i32) -> EnemySpawn {
    EnemySpawn {
        kind: EnemyKind::GroundPatrol,
        x,
        y: 12,
    }
}

const fn shell(x: i32) -> EnemySpawn {
    EnemySpawn {
        kind: EnemyKind::ShellCapable,
        x,
        y: 12,
    }
}

const GROUND: [CellRect; 4] = [
    run(0, 13, 69, 2),
    run(71, 13, 14, 2),
    run(86, 13, 63, 2),
    run(153, 13, 59, 2),
];

const BRICKS: [CellRect; 22] = [
    run(16, 9, 1, 1),
    run(20, 9, 1, 1),
    run(21, 9, 1, 1),
    run(22, 9, 1, 1),
    run(23, 9, 1, 1),
    run(24, 9, 1, 1),
    run(77, 9, 1, 1),
    run(78, 9, 1, 1),
    run(80, 5, 8, 1),
    run(91, 9, 1, 1),
    run(94, 9, 1, 1),
    run(100, 5, 3, 1),
    run(107, 9, 1, 1),
    run(109, 9, 2, 1),
    run(118, 9, 1, 1),
    run(121, 5, 3, 1),
    run(128, 5, 1, 1),
    run(129, 9, 2, 1),
    run(131, 5, 1, 1),
    run(168, 9, 1, 1),
    run(169, 9, 1, 1),
    run(171, 9, 1, 1),
];

const QUESTIONS: [QuestionCell; 11] = [
    question(16, 9, Reward::Coin),
    question(21, 5, Reward::Mushroom),
    question(22, 9, Reward::Coin),
    question(78, 9, Reward::Coin),
    question(94, 9, Reward::Coin),
    question(106, 9, Reward::Mushroom),
    question(109, 9, Reward::Coin),
    question(109, 5, Reward::Coin),
    question(110, 9, Reward::Coin),
    question(129, 9, Reward::Coin),
    question(130, 9, Reward::Coin),
];

const PIPES: [PipeStack; 6] = [
    pipe(28, 2),
    pipe(38, 3),
    pipe(46, 4),
    pipe(57, 4),
    pipe(163, 2),
    pipe(179, 2),
];

/// Two up-and-down staircases
const STAIRS: [Cell; 15] = [
    cell(134, 12),
    cell(135, 11),
    cell(136, 10),
    cell(137, 9),
    cell(138, 9),
    cell(139, 10),
    cell(140, 11),
    cell(141, 12),
    cell(148, 12),
    cell(149, 11),
    cell(150, 10),
    cell(151, 9),
    cell(152, 10),
    cell(153, 11),
    cell(154, 12),
];

const FLAG: FlagPole = FlagPole {
    x: 198,
    y: 3,
    height: 10,
};

const ENEMIES: [EnemySpawn; 14] = [
    patrol(22),
    patrol(40),
    patrol(51),
    patrol(52),
    patrol(80),
    patrol(81),
    shell(97),
    patrol(114),
    patrol(115),
    shell(123),
    patrol(126),
    patrol(127),
    patrol(174),
    patrol(175),
];

pub fn world_1_1() -> LevelDescription {
    LevelDescription {
        columns: LEVEL_COLUMNS,
        rows: LEVEL_ROWS,
        ground: GROUND.to_vec(),
        bricks: BRICKS.to_vec(),
        questions: QUESTIONS.to_vec(),
        pipes: PIPES.to_vec(),
        stairs: STAIRS.to_vec(),
        flag: Some(FLAG),
        enemies: ENEMIES.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{LevelGrid, TileKind};

    #[test]
    fn test_world_1_1_shape() {
        let desc = world_1_1();
        assert_eq!(desc.pixel_width(), 6784.0);
        assert_eq!(desc.pixel_height(), 480.0);
        assert_eq!(desc.enemies.len(), 14);

        let grid = LevelGrid::from_description(&desc);
        let count = |kind| grid.tiles().iter().filter(|t| t.kind == kind).count();
        // 69 + 14 + 63 + 59 columns, two rows deep
        assert_eq!(count(TileKind::Ground), 410);
        assert_eq!(count(TileKind::Question), 11);
        // 35 authored brick cells, 8 shadowed by question blocks, plus stairs
        assert_eq!(count(TileKind::Brick), 35 - 8 + 15);
        assert_eq!(count(TileKind::PipeTop), 6);
        assert_eq!(count(TileKind::PipeBody), 11);
        assert_eq!(grid.flag_pole().unwrap().rect.x, 6336.0);
    }

    #[test]
    fn test_pipe_top_rows() {
        let tops: Vec<i32> = PIPES.iter().map(|p| p.top_row()).collect();
        assert_eq!(tops, vec![11, 10, 9, 9, 11, 11]);
    }
}
