use std::fmt;

pub type Result<T> = std::result::Result<T, HistoryError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// 没有可撤销的复合编辑
    IllegalUndo,
    /// 没有可重做的复合编辑
    IllegalRedo,
    /// 记录的变更已经放不进当前文档（文档被带外修改过）
    StaleMutation {
        offset: usize,
        len: usize,
        doc_len: usize,
    },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::IllegalUndo => write!(f, "nothing to undo"),
            HistoryError::IllegalRedo => write!(f, "nothing to redo"),
            HistoryError::StaleMutation {
                offset,
                len,
                doc_len,
            } => write!(
                f,
                "stale mutation: {}..{} does not fit document of length {}",
                offset,
                offset.saturating_add(*len),
                doc_len
            ),
        }
    }
}

impl std::error::Error for HistoryError {}
