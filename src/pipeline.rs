#![allow(non_snake_case)]
/// closed operator token sets of the pretrained model and vocabulary
/// extraction over predicted expressions
/// ________________________________________________________________________________________________________________________________
pub mod operators;
/// ________________________________________________________________________________________________________________________________
/// consistency filter: keeps only candidates whose unary operator vocabulary
/// is a subset of the top-2 candidates' vocabulary
pub mod filter;
/// ________________________________________________________________________________________________________________________________
/// token rewrite, algebraic expansion and (equation, loss, complexity) CSV
/// emission for the downstream equation-selection tool
pub mod emitter;
/// ________________________________________________________________________________________________________________________________
/// subsets flat and nested operator constraint maps to a given operator list
pub mod constraints;
/// ________________________________________________________________________________________________________________________________
/// pretrained checkpoint loading glue (external collaborator)
pub mod model;
