/// Column the companion should be shown in, given the column of the active editor.
pub fn target_column(active: Option<u32>, use_other_column: bool) -> u32 {
    match active {
        None => 1,
        Some(column) if !use_other_column => column,
        Some(1) => 2,
        Some(_) => 1,
    }
}
