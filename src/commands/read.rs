/// 読み込みコマンド
///
/// マッピングCSVを読み込み、商品ID → 納品プランNo の対応表を表示します。
/// Shift_JIS で保存し直されたファイルやヘッダー名の異なるファイルも受け付けます。
use crate::commands::result::{CommandResult, MappingInfo, ReadResult};
use crate::domain::plan_map::PlanMap;
use crate::domain::validator;
use crate::storage::sheet;
use anyhow::{Context, Result};

/// 読み込みコマンドを実行する
///
/// # 引数
/// * `mapping_path` - マッピングCSV
/// * `product_ids` - 照合する商品ID。空の場合は全件を表示
pub fn execute(mapping_path: &str, product_ids: &[String]) -> Result<CommandResult> {
    let input =
        validator::validate_input_file(mapping_path).context("Mapping file validation failed")?;

    let plan_map = sheet::read_plan_map(&input)
        .with_context(|| format!("Failed to read mapping file {}", mapping_path))?;

    if plan_map.is_empty() {
        tracing::warn!(path = %input.path.display(), "mapping file has no entries");
    } else {
        tracing::debug!(entries = plan_map.len(), "mapping file loaded");
    }

    let (mappings, unmatched) = if product_ids.is_empty() {
        let all = plan_map
            .iter()
            .map(|(product_id, plans)| mapping_info(product_id, plans))
            .collect();
        (all, Vec::new())
    } else {
        lookup(&plan_map, product_ids)
    };
    let total_count = mappings.len();

    Ok(CommandResult::Read(ReadResult {
        file_path: input.path,
        mappings,
        unmatched,
        total_count,
    }))
}

/// 指定された商品IDを対応表で引く
///
/// 見つかったものは指定順、見つからなかったIDは unmatched に入る。
fn lookup(plan_map: &PlanMap, product_ids: &[String]) -> (Vec<MappingInfo>, Vec<String>) {
    let mut found = Vec::new();
    let mut unmatched = Vec::new();

    for product_id in product_ids {
        match plan_map.get(product_id.trim()) {
            Some(plans) => found.push(mapping_info(product_id.trim(), plans)),
            None => unmatched.push(product_id.clone()),
        }
    }

    (found, unmatched)
}

fn mapping_info(product_id: &str, plans: &str) -> MappingInfo {
    MappingInfo {
        product_id: product_id.to_string(),
        plans: plans.to_string(),
    }
}
