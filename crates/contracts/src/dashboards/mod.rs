pub mod d100_scorecard;
