use member_order_di::settings::{AppSettings, ConfigurationStyle, DiscountPolicyKind};

/// テスト用の設定を作る
///
/// 割引額・割引率はデフォルト値（1000 / 10%）を使う。
pub fn settings(style: ConfigurationStyle, policy: DiscountPolicyKind) -> AppSettings {
    let mut settings = AppSettings::default();
    settings.configuration = style;
    settings.discount.policy = policy;
    settings
}
