/// Best gains at or below this value are treated as "no useful split".
pub const MIN_INFORMATION_GAIN: f64 = 1e-12;
/// Indentation used per depth level when rendering a tree.
pub const TREE_INDENT: &str = "      ";
