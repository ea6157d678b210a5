//! Column names of the filing dataset.
//!
//! The dataset is a single CSV table with one row per corporate filing.
//! These constants are the only place column names are spelled out; every
//! other crate goes through them.

/// Accession number uniquely identifying a filing.
pub const ACC_NUM: &str = "ACC_NUM";

/// Company name.
pub const CO_NAME: &str = "CoName";

/// Filing date.
pub const FILING_DATE: &str = "FILING_DATE";

/// Year-month grouping key derived from [`FILING_DATE`] at load time.
pub const YEAR_MONTH: &str = "ym";

/// SIC industry classification code.
pub const SIC: &str = "SIC";

/// Form type (10-K, 10-Q, ...).
pub const FORM_TYPE: &str = "FORM_TYPE";

/// Binary macro-regime flag (0 = expansion, 1 = recession). Optional column.
pub const MARKET_CONDITION: &str = "MarketCondition";

/// Text-complexity score of the filing document.
pub const CCTI: &str = "CCTI";

/// Squared complexity score (captures nonlinearity in the regression).
pub const CCTI_SQ: &str = "CCTI_sq";

/// Realized 30-day raw return.
pub const RETURN_30D: &str = "Return_30D_new";

/// Realized 30-day excess return over the benchmark. Prediction target.
pub const EXCESS_RET: &str = "ExcessRet";

/// Realized 30-day volatility.
pub const VOL_30D: &str = "Vol_30d";

/// 12-1 month momentum.
pub const MOMENTUM: &str = "Momentum_12_1";

/// Winsorized book-to-market factor.
pub const BOOK_TO_MARKET: &str = "BM_w";

/// Winsorized size factor.
pub const SIZE: &str = "Size_w";

/// Negative sentiment word-count ratio.
pub const NEGATIVE: &str = "Negative";

/// Positive sentiment word-count ratio.
pub const POSITIVE: &str = "Positive";

/// Uncertainty sentiment word-count ratio.
pub const UNCERTAINTY: &str = "Uncertainty";

/// Litigious sentiment word-count ratio.
pub const LITIGIOUS: &str = "Litigious";

/// Strong-modal sentiment word-count ratio.
pub const STRONG_MODAL: &str = "StrongModal";

/// Weak-modal sentiment word-count ratio.
pub const WEAK_MODAL: &str = "WeakModal";

/// Constraining sentiment word-count ratio.
pub const CONSTRAINING: &str = "Constraining";

/// Columns coerced to `f64` and median-imputed at load time.
///
/// Invariant: after a successful load, none of these columns contains
/// missing values.
pub const NUMERIC_COLUMNS: [&str; 15] = [
    CCTI,
    RETURN_30D,
    EXCESS_RET,
    VOL_30D,
    MOMENTUM,
    BOOK_TO_MARKET,
    SIZE,
    NEGATIVE,
    POSITIVE,
    UNCERTAINTY,
    LITIGIOUS,
    STRONG_MODAL,
    WEAK_MODAL,
    CONSTRAINING,
    CCTI_SQ,
];

/// Model features, in the fixed order the regressor and neighbor index
/// were fitted with. Callers must never reorder.
pub const FEATURE_COLUMNS: [&str; 8] =
    [CCTI, CCTI_SQ, MOMENTUM, VOL_30D, BOOK_TO_MARKET, SIZE, NEGATIVE, POSITIVE];

/// Sentiment columns selectable for the heatmap.
pub const SENTIMENT_COLUMNS: [&str; 7] =
    [NEGATIVE, POSITIVE, UNCERTAINTY, LITIGIOUS, STRONG_MODAL, WEAK_MODAL, CONSTRAINING];

/// Regression target.
pub const TARGET: &str = EXCESS_RET;
