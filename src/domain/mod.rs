/// ドメイン層
///
/// 外部I/Oを持たないビジネスロジック。
/// - `mapping`: マッピングCSVの構築
/// - `plan_map`: マッピングCSVの読み戻し
/// - `formatter`: 出力ファイル名
/// - `validator`: 入力ファイルの検証
pub mod error;
pub mod formatter;
pub mod mapping;
pub mod plan_map;
pub mod validator;
