/// プレゼンテーション層モジュール
///
/// コマンド結果とエラーをユーザー向け（stderr）または
/// 機械向け（stdout の JSON）に出力します。
pub mod output;
