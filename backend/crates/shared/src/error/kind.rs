//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum shared by the auth and attendance crates.

/// エラー種別の列挙体
///
/// 発行側・スキャン側の両方で共通のエラー分類を定義します。
/// いずれのエラーもユーザー操作（リセット・再試行）で回復可能です。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Expired;
/// assert_eq!(kind.as_str(), "Expired");
/// assert!(!kind.is_internal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 入力値が不正（空のクラスID、短すぎる資格情報など）
    InvalidInput,
    /// 識別子がどのロールにも該当しない、またはセッションなし
    Unauthorized,
    /// ロールが操作を許可していない
    Forbidden,
    /// 現在の状態では実行できない操作
    Conflict,
    /// スキャンしたコードが解析できない
    Malformed,
    /// コードの有効期限切れ
    Expired,
    /// キャプチャデバイスなど外部協調者が利用不可
    Unavailable,
    /// 内部エラー（ストレージ障害など）
    Internal,
}

impl ErrorKind {
    /// ユーザー向けの文字列表現を取得
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "Invalid Input",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Malformed => "Malformed",
            ErrorKind::Expired => "Expired",
            ErrorKind::Unavailable => "Unavailable",
            ErrorKind::Internal => "Internal Error",
        }
    }

    /// 内部エラーかどうかを判定
    ///
    /// `true` の場合はログに error レベルで記録すべきです。
    #[inline]
    pub const fn is_internal(&self) -> bool {
        matches!(self, ErrorKind::Internal)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
