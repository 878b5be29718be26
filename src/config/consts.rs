/// Label of placeholder signals created to fill gaps in sparse naming
pub const UNUSED_SIGNAL_LABEL: &str = "(unused)";

/// Slot of the `labels` node inside a matrix wrapper node
pub const LABELS_SLOT: i32 = 1;
pub const LABELS_IDENTIFIER: &str = "labels";
/// Slot of the target labels node inside `labels`
pub const TARGET_LABELS_SLOT: i32 = 1;
pub const TARGET_LABELS_IDENTIFIER: &str = "targets";
/// Slot of the source labels node inside `labels`
pub const SOURCE_LABELS_SLOT: i32 = 2;
pub const SOURCE_LABELS_IDENTIFIER: &str = "sources";

/// Slot of the matrix element inside its wrapper node
pub const MATRIX_SLOT: i32 = 2;
pub const DEFAULT_MATRIX_IDENTIFIER: &str = "matrix";

/// Number of blind sources a blind-source matrix reserves ahead of the real ones
pub const BLIND_SOURCE_COUNT: i32 = 1;

/// Range given to integer parameters built without one
pub const DEFAULT_INTEGER_RANGE: (i64, i64) = (0, 255);
/// Range given to real parameters built without one
pub const DEFAULT_REAL_RANGE: (f64, f64) = (0.0, 255.0);
