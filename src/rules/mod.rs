//! Game rules for five-in-a-row
//!
//! Freestyle rules: any line of five or more wins, no captures, no
//! forbidden shapes.

pub mod win;

pub use win::{
    check_winner, find_five_line_at_pos, find_five_positions, has_five_at_pos, has_five_in_row,
};
