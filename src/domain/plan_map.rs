/// ドメインサービス: マッピングCSVの読み戻し
///
/// 書き出したマッピングCSV（または手作業で用意した同等のCSV）から
/// 商品ID → 納品プランNo の対応表を作る。
use crate::config::APP_CONFIG;
use crate::domain::mapping::split_plans;
use std::collections::BTreeMap;

/// 商品ID → 連結済みプランNo の対応表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanMap {
    entries: BTreeMap<String, String>,
}

/// ヘッダーから決めた列位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub product: usize,
    pub plan: usize,
}

impl ColumnLayout {
    /// ヘッダー行から商品ID列と納品プランNo列を探す
    ///
    /// どちらかが見つからない場合は先頭2列を使う。
    pub fn detect(header: &[String]) -> Self {
        let mut product = None;
        let mut plan = None;

        for (index, label) in header.iter().enumerate() {
            let label = label.trim();
            if is_alias(APP_CONFIG.mapping.product_header_aliases, label) {
                product = Some(index);
            } else if is_alias(APP_CONFIG.mapping.plan_header_aliases, label) {
                plan = Some(index);
            }
        }

        match (product, plan) {
            (Some(product), Some(plan)) => Self { product, plan },
            _ => Self {
                product: 0,
                plan: 1,
            },
        }
    }
}

fn is_alias(aliases: &[&str], label: &str) -> bool {
    aliases.iter().any(|alias| *alias == label)
}

impl PlanMap {
    /// レコード列（先頭はヘッダー）から対応表を作る
    ///
    /// 同じ商品IDが複数回現れた場合は後の行で上書きされる。
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut records = records.into_iter();
        let mut map = Self::default();

        let Some(header) = records.next() else {
            return map;
        };
        let layout = ColumnLayout::detect(&header);

        for record in records {
            if record.len() <= layout.product.max(layout.plan) {
                continue;
            }

            let product_id = record[layout.product].trim();
            let plans = split_plans(&record[layout.plan]);
            if product_id.is_empty() || plans.is_empty() {
                continue;
            }

            map.entries.insert(
                product_id.to_string(),
                plans.join(APP_CONFIG.mapping.plan_separator),
            );
        }

        map
    }

    pub fn get(&self, product_id: &str) -> Option<&str> {
        self.entries.get(product_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 商品ID順に列挙する
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(pid, plans)| (pid.as_str(), plans.as_str()))
    }
}
