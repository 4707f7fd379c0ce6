use super::*;

mod helpers;
mod state_set;
mod transitions;

use helpers::*;

#[test]
fn o_opening_is_correct() {
    insta::assert_snapshot!(State::opening(Player::O).pretty(), @r###"
    |---|
    |***|
    |***|
    |***|
    |---|
    turn: O
    "###);
}

#[test]
fn full_queue_marks_oldest_lowercase() {
    let state = play(Player::O, &[0, 4, 1, 8, 5]);
    insta::assert_snapshot!(state.pretty(), @r###"
    |---|
    |oO*|
    |*XO|
    |**X|
    |---|
    turn: X
    "###);
}

#[test]
fn sentinel_names_both_players() {
    insta::assert_snapshot!(
        State::terminal(Player::X).pretty(),
        @"terminal: X to move, O has won"
    );
}

#[test]
fn opening_children_are_correct() {
    let mut children = vec![];
    State::opening(Player::X).visit_children(|_, child| children.push(child));
    let children = Pretty(children.as_slice()).to_string();
    insta::assert_snapshot!(children, @r###"
    |---|
    |X**|
    |***|
    |***|
    |---|
    turn: O

    |---|
    |*X*|
    |***|
    |***|
    |---|
    turn: O

    |---|
    |**X|
    |***|
    |***|
    |---|
    turn: O

    |---|
    |***|
    |X**|
    |***|
    |---|
    turn: O

    |---|
    |***|
    |*X*|
    |***|
    |---|
    turn: O

    |---|
    |***|
    |**X|
    |***|
    |---|
    turn: O

    |---|
    |***|
    |***|
    |X**|
    |---|
    turn: O

    |---|
    |***|
    |***|
    |*X*|
    |---|
    turn: O

    |---|
    |***|
    |***|
    |**X|
    |---|
    turn: O
    "###);
}
