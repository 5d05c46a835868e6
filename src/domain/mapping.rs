/// ドメインサービス: 商品ID → 納品プランNo マッピングCSVの構築
///
/// シートから取り出した行（商品ID・納品プランNoのペア）を受け取り、
/// ヘッダー付きのCSVテキストを組み立てる。I/Oは行わない純粋な変換。
///
/// - 商品IDかプランのどちらかが空（trim後）の行は出力しない
/// - 行の順序は入力の順序のまま（ソート・重複排除なし）
/// - カンマを含む値だけをダブルクォートで囲む。値中のダブルクォートや
///   改行のエスケープは行わない
use crate::config::APP_CONFIG;
use crate::domain::error::DomainError;
use std::borrow::Cow;

/// シートの1行分（商品ID列と納品プランNo列のペア）
///
/// 列の値は空セルや列不足の場合 None になる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub product_id: Option<String>,
    pub plan_field: Option<String>,
}

impl Row {
    #[cfg(test)]
    pub fn new(product_id: impl Into<String>, plan_field: impl Into<String>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            plan_field: Some(plan_field.into()),
        }
    }

    /// マッピング対象なら MappingEntry に変換する
    pub fn to_entry(&self) -> Option<MappingEntry> {
        let product_id = self.product_id.as_deref()?;
        if product_id.trim().is_empty() {
            return None;
        }

        let plans = split_plans(self.plan_field.as_deref()?);
        if plans.is_empty() {
            return None;
        }

        Some(MappingEntry {
            product_id: product_id.to_string(),
            plans,
        })
    }
}

/// 別々に取り出した2つの列を行単位のペアにまとめる
///
/// # Errors
/// 列の長さが異なる場合に DomainError::ColumnLengthMismatch を返す。
pub fn pair_columns(
    products: Vec<Option<String>>,
    plans: Vec<Option<String>>,
) -> Result<Vec<Row>, DomainError> {
    if products.len() != plans.len() {
        return Err(DomainError::ColumnLengthMismatch {
            products: products.len(),
            plans: plans.len(),
        });
    }

    Ok(products
        .into_iter()
        .zip(plans)
        .map(|(product_id, plan_field)| Row {
            product_id,
            plan_field,
        })
        .collect())
}

/// 1商品分のマッピング
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub product_id: String,
    /// trim済み・空要素なし・元の順序
    pub plans: Vec<String>,
}

impl MappingEntry {
    /// 複数プランを区切り文字で連結した値
    pub fn joined_plans(&self) -> String {
        self.plans.join(APP_CONFIG.mapping.plan_separator)
    }

    /// CSVの1行（改行なし）
    pub fn to_csv_line(&self) -> String {
        let joined = self.joined_plans();
        format!(
            "{},{}",
            escape_field(&self.product_id),
            escape_field(&joined)
        )
    }
}

/// 構築済みのマッピングCSV
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvDocument {
    pub entries: Vec<MappingEntry>,
    /// 出力対象にならなかった行の数
    pub skipped_rows: usize,
}

impl CsvDocument {
    /// ヘッダー行
    pub fn header() -> String {
        format!(
            "{},{}",
            APP_CONFIG.mapping.product_header, APP_CONFIG.mapping.plan_header
        )
    }

    /// CSVテキストに変換する
    ///
    /// 各行は `\n` で連結され、末尾に改行は付かない。
    pub fn render(&self) -> String {
        std::iter::once(Self::header())
            .chain(self.entries.iter().map(MappingEntry::to_csv_line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// 行の列からマッピングCSVを構築する
pub fn build_mapping(rows: &[Row]) -> CsvDocument {
    let mut document = CsvDocument::default();

    for row in rows {
        match row.to_entry() {
            Some(entry) => document.entries.push(entry),
            None => document.skipped_rows += 1,
        }
    }

    document
}

/// 改行区切りのプランNoセルを分解する
///
/// `\r\n` と `\r` も改行として扱う。各要素は trim し、空要素は捨てる。
pub fn split_plans(field: &str) -> Vec<String> {
    field
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|plan| !plan.is_empty())
        .map(str::to_string)
        .collect()
}

/// カンマを含む値をダブルクォートで囲む
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains(',') {
        Cow::Owned(format!("\"{}\"", value))
    } else {
        Cow::Borrowed(value)
    }
}
