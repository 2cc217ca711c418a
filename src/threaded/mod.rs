//! Fork-join execution of the Strassen recursion.
//!
//! The seven products of a level share no mutable state, so above the
//! parallel threshold they run as rayon tasks joined before the combine
//! step. Below it the recursion continues sequentially inside whichever
//! worker picked the task up.

pub mod strassen_mt;
