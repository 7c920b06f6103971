use super::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_stone_signed() {
    for stone in [Stone::Black, Stone::White, Stone::Empty] {
        assert_eq!(Stone::from_signed(i32::from(stone.to_signed())), Some(stone));
    }
    assert_eq!(Stone::from_signed(2), None);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::center();
    assert_eq!(pos.to_index(), 6 * 13 + 6);
    assert_eq!(pos.to_index(), 84);

    let pos2 = Pos::from_index(84);
    assert_eq!(pos2, Pos::new(6, 6));
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(12, 12));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, -1));
    assert!(!Pos::is_valid(13, 0));
    assert!(!Pos::is_valid(0, 13));
}

#[test]
fn test_board_constants() {
    assert_eq!(BOARD_SIZE, 13);
    assert_eq!(TOTAL_CELLS, 169);
    assert_eq!(CENTER, 6);
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
}

#[test]
fn test_pos_step() {
    let p = Pos::new(0, 0);
    assert_eq!(p.step((1, 1), 2), Some(Pos::new(2, 2)));
    assert_eq!(p.step((1, 1), -1), None);
    assert_eq!(Pos::new(12, 0).step((1, -1), -3), Some(Pos::new(9, 3)));
}

#[test]
fn test_pos_mirror() {
    assert_eq!(Pos::new(0, 3).mirrored(), Pos::new(12, 9));
    assert_eq!(Pos::center().mirrored(), Pos::center());
}

#[test]
fn test_board_get_at_off_board() {
    let board = Board::new();
    assert_eq!(board.get_at(6, 6), Some(Stone::Empty));
    assert_eq!(board.get_at(-1, 6), None);
    assert_eq!(board.get_at(6, 13), None);
}

#[test]
fn test_board_counts() {
    let mut board = Board::new();
    assert!(board.is_board_empty());
    board.place_stone(Pos::new(3, 4), Stone::Black);
    board.place_stone(Pos::new(0, 0), Stone::White);
    assert_eq!(board.stone_count(), 2);
    assert_eq!(board.empty_positions().count(), 167);
    assert_eq!(board.stones(Stone::White).collect::<Vec<_>>(), vec![Pos::new(0, 0)]);
    board.remove_stone(Pos::new(3, 4));
    assert_eq!(board.stone_count(), 1);
}

#[test]
fn test_board_full() {
    let mut board = Board::new();
    for idx in 0..TOTAL_CELLS {
        board.set(Pos::from_index(idx), Stone::Black);
    }
    assert!(board.is_full());
    assert_eq!(board.empty_positions().next(), None);
}

#[test]
fn test_simulate_restores_empty() {
    let mut board = Board::new();
    let before = board;
    {
        let guard = board.simulate(Pos::new(5, 5), Stone::White);
        assert_eq!(guard.get(Pos::new(5, 5)), Stone::White);
    }
    assert_eq!(board, before);
}

#[test]
fn test_with_move_restores_previous_stone() {
    let mut board = Board::new();
    board.set(Pos::new(2, 2), Stone::Black);
    let seen = board.with_move(Pos::new(2, 2), Stone::White, |b| b.get(Pos::new(2, 2)));
    assert_eq!(seen, Stone::White);
    assert_eq!(board.get(Pos::new(2, 2)), Stone::Black);
}

#[test]
fn test_nested_simulation() {
    let mut board = Board::new();
    board.with_move(Pos::new(1, 1), Stone::Black, |b| {
        b.with_move(Pos::new(1, 2), Stone::White, |b| {
            assert_eq!(b.stone_count(), 2);
        });
        assert_eq!(b.stone_count(), 1);
    });
    assert!(board.is_board_empty());
}

#[test]
fn test_from_signed_validation() {
    let rows = vec![vec![0i32; 13]; 12];
    assert_eq!(
        Board::from_signed(&rows),
        Err(BoardError::RowCount {
            expected: 13,
            actual: 12
        })
    );

    let mut rows = vec![vec![0i32; 13]; 13];
    rows[4][7] = 2;
    assert_eq!(
        Board::from_signed(&rows),
        Err(BoardError::InvalidCell {
            row: 4,
            col: 7,
            value: 2
        })
    );

    rows[4][7] = -1;
    let board = Board::from_signed(&rows).unwrap();
    assert_eq!(board.get(Pos::new(4, 7)), Stone::White);
    assert_eq!(board.to_signed(), rows);
}
