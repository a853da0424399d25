use std::{error, fmt};

/// Error enumerates over all possible errors that this package
/// shall return.
#[derive(Debug, PartialEq)]
pub enum Error<K> {
    /// Returned by min() and max() when there are no entries.
    EmptyTree,
    /// Returned by create() API when key is already present.
    OverwriteKey,
    /// Fatal case, root node is colored red.
    RedRoot,
    /// Fatal case, a red node has a red parent.
    ConsecutiveReds,
    /// Fatal case, number of blacks differ between two paths. The String
    /// component of this variant can be used for debugging.
    UnbalancedBlacks(String),
    /// Fatal case, index entries are not in sort-order.
    SortError(K, K),
    /// Fatal case, a child's parent link does not point back to the node
    /// holding it.
    DanglingParent(String),
    /// Fatal case, (counted, expected) number of entries differ.
    CountMismatch(usize, usize),
}

impl<K> fmt::Display for Error<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EmptyTree => write!(f, "empty tree"),
            Error::OverwriteKey => write!(f, "key already present"),
            Error::RedRoot => write!(f, "root node is red"),
            Error::ConsecutiveReds => write!(f, "consecutive red nodes"),
            Error::UnbalancedBlacks(msg) => write!(f, "unbalanced blacks, {}", msg),
            Error::SortError(a, b) => write!(f, "sort error, {:?} vs {:?}", a, b),
            Error::DanglingParent(msg) => write!(f, "dangling parent, {}", msg),
            Error::CountMismatch(n, m) => write!(f, "count mismatch {} != {}", n, m),
        }
    }
}

impl<K> error::Error for Error<K> where K: fmt::Debug {}
