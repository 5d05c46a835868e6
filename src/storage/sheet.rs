/// シートCSV・マッピングCSVの読み込み
///
/// 複数行のプランNoセルはクォート付きの複数行フィールドとして
/// エクスポートされるため、csv クレートでレコード単位に読む。
use crate::config::UserConfig;
use crate::domain::plan_map::PlanMap;
use crate::domain::validator::InputFile;
use crate::storage::decode::decode_text;
use crate::storage::error::InfraError;
use csv::{ReaderBuilder, StringRecord};
use std::fs;

/// シート上の列配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub product_column: usize,
    pub plan_column: usize,
    pub header_rows: usize,
}

impl From<&UserConfig> for SheetLayout {
    fn from(config: &UserConfig) -> Self {
        Self {
            product_column: config.product_column,
            plan_column: config.plan_column,
            header_rows: config.header_rows,
        }
    }
}

/// シートから取り出した2列（商品ID列・納品プランNo列）
///
/// 各列は同じレコードから取り出すため長さは常に一致する。
/// 行ペアへの変換は `domain::mapping::pair_columns` で行う。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetColumns {
    pub products: Vec<Option<String>>,
    pub plans: Vec<Option<String>>,
}

/// 空セル・列不足は None
fn non_empty_cell(record: &StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
}

/// シートのエクスポートファイルから2列を読み込む
pub fn read_sheet_columns(
    input: &InputFile,
    layout: &SheetLayout,
) -> Result<SheetColumns, InfraError> {
    let content = read_text(input)?;
    parse_sheet_columns(&content, input.delimiter, layout)
}

/// シートCSVのテキストから2列を取り出す
pub fn parse_sheet_columns(
    content: &str,
    delimiter: u8,
    layout: &SheetLayout,
) -> Result<SheetColumns, InfraError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut columns = SheetColumns::default();
    for (index, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| InfraError::csv(format!("sheet record {}", index + 1), e))?;
        if index < layout.header_rows {
            continue;
        }
        columns
            .products
            .push(non_empty_cell(&record, layout.product_column));
        columns
            .plans
            .push(non_empty_cell(&record, layout.plan_column));
    }

    tracing::debug!(rows = columns.products.len(), "parsed sheet columns");
    Ok(columns)
}

/// マッピングCSVを読み込んで対応表にする
pub fn read_plan_map(input: &InputFile) -> Result<PlanMap, InfraError> {
    let content = read_text(input)?;
    parse_plan_map(&content, input.delimiter)
}

pub fn parse_plan_map(content: &str, delimiter: u8) -> Result<PlanMap, InfraError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| InfraError::csv(format!("mapping record {}", index + 1), e))?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(PlanMap::from_records(records))
}

fn read_text(input: &InputFile) -> Result<String, InfraError> {
    let bytes = fs::read(&input.path).map_err(|e| {
        InfraError::io(format!("Failed to read {}", input.path.display()), e)
    })?;
    Ok(decode_text(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mapping::{Row, build_mapping, pair_columns};
    use crate::domain::validator::validate_input_file;
    use tempfile::TempDir;

    fn layout() -> SheetLayout {
        SheetLayout {
            product_column: 2,
            plan_column: 4,
            header_rows: 1,
        }
    }

    fn parse_rows(content: &str, delimiter: u8, layout: &SheetLayout) -> Vec<Row> {
        let columns = parse_sheet_columns(content, delimiter, layout).unwrap();
        pair_columns(columns.products, columns.plans).unwrap()
    }

    #[test]
    fn test_parse_sheet_with_multiline_cell() {
        let content = "No,棚,商品ID,数量,納品プランNo\n\
                       1,A-01,P100,3,\"PLAN-1\nPLAN-2\"\n\
                       2,A-02,\"P,200\",1,PLAN-3\n";

        assert_eq!(
            parse_rows(content, b',', &layout()),
            vec![Row::new("P100", "PLAN-1\nPLAN-2"), Row::new("P,200", "PLAN-3")]
        );
    }

    #[test]
    fn test_short_records_give_absent_cells() {
        let content = "header\n1,A,P100\n2,A,,,PLAN-9\n";

        let columns = parse_sheet_columns(content, b',', &layout()).unwrap();
        assert_eq!(columns.products, vec![Some("P100".to_string()), None]);
        assert_eq!(columns.plans, vec![None, Some("PLAN-9".to_string())]);
    }

    #[test]
    fn test_header_rows_skipped() {
        let content = "title\nNo,棚,商品ID,数量,納品プランNo\n1,A,P1,1,X\n";
        let layout = SheetLayout {
            header_rows: 2,
            ..layout()
        };

        assert_eq!(parse_rows(content, b',', &layout), vec![Row::new("P1", "X")]);
    }

    #[test]
    fn test_tab_delimited() {
        let content = "a\tb\tc\td\te\n1\t2\tP1\t4\tX\n";
        assert_eq!(
            parse_rows(content, b'\t', &layout()),
            vec![Row::new("P1", "X")]
        );
    }

    #[test]
    fn test_written_mapping_reads_back() {
        let rows = vec![
            Row::new("P100", "PLAN-1\nPLAN-2"),
            Row::new("P200", "PLAN-3"),
            Row::new("", "PLAN-4"),
        ];
        let content = build_mapping(&rows).render();

        let map = parse_plan_map(&content, b',').unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("P100"), Some("PLAN-1 / PLAN-2"));
        assert_eq!(map.get("P200"), Some("PLAN-3"));
    }

    #[test]
    fn test_read_plan_map_from_shift_jis_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mapping.csv");
        let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode("商品コード,ラベル\nP1,L-1\n");
        fs::write(&path, &encoded).unwrap();

        let input = validate_input_file(path.to_str().unwrap()).unwrap();
        let map = read_plan_map(&input).unwrap();
        assert_eq!(map.get("P1"), Some("L-1"));
    }

    #[test]
    fn test_read_sheet_columns_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sheet.csv");
        fs::write(&path, "h\n,,P1,,X\n").unwrap();

        let input = validate_input_file(path.to_str().unwrap()).unwrap();
        let columns = read_sheet_columns(&input, &layout()).unwrap();
        assert_eq!(columns.products, vec![Some("P1".to_string())]);
        assert_eq!(columns.plans, vec![Some("X".to_string())]);
    }
}
