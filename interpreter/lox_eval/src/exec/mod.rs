//! Recursive evaluation: expressions, statements, and calls.
//!
//! Every step threads the id of the frame it evaluates against; calls
//! create child frames of the callee's captured frame, blocks create
//! child frames of the current one.

mod call;
mod control;
mod expr;
