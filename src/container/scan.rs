use super::context::ContextBuilder;
use super::definition::BeanDefinition;

/// 型に付与するマーカー
///
/// `Service`・`Repository`・`Configuration` はいずれも `Component` の一種として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stereotype {
    Component,
    Service,
    Repository,
    Configuration,
}

/// コンポーネント登録
///
/// 型の定義と同じモジュールで `inventory::submit!` により登録される。
/// 実行時にスキャンするクラスパスの代わりに、ビルド時に集められた登録一覧を走査する。
#[derive(Debug)]
pub struct ComponentRegistration {
    pub module_path: &'static str,
    pub type_name: &'static str,
    pub stereotypes: &'static [Stereotype],
    pub primary: bool,
    pub define: fn(String) -> BeanDefinition,
}

inventory::collect!(ComponentRegistration);

impl ComponentRegistration {
    pub const fn new(
        module_path: &'static str,
        type_name: &'static str,
        stereotypes: &'static [Stereotype],
        define: fn(String) -> BeanDefinition,
    ) -> Self {
        Self {
            module_path,
            type_name,
            stereotypes,
            primary: false,
            define,
        }
    }

    pub const fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    pub fn is_annotated(&self, stereotype: Stereotype) -> bool {
        self.stereotypes.contains(&stereotype)
    }

    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.module_path, self.type_name)
    }

    pub fn bean_name(&self) -> String {
        default_bean_name(self.type_name)
    }

    pub fn definition(&self) -> BeanDefinition {
        let definition = (self.define)(self.bean_name());
        if self.primary {
            definition.primary()
        } else {
            definition
        }
    }
}

/// 除外フィルター
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanFilter {
    /// 指定したマーカーを持つ型を除外
    Annotation(Stereotype),
    /// 型名（単純名または完全修飾名）で除外
    TypeName(String),
}

impl ScanFilter {
    pub fn matches(&self, registration: &ComponentRegistration) -> bool {
        match self {
            ScanFilter::Annotation(stereotype) => registration.is_annotated(*stereotype),
            ScanFilter::TypeName(name) => {
                registration.type_name == name || registration.qualified_name() == *name
            }
        }
    }
}

/// コンポーネントスキャン
///
/// ベースパッケージ（モジュールパス）配下の登録を集め、除外フィルターに一致するものを取り除く。
/// 発見順は保証しない。
#[derive(Debug, Clone)]
pub struct ComponentScan {
    base_packages: Vec<String>,
    exclude_filters: Vec<ScanFilter>,
}

impl ComponentScan {
    pub fn new(base_package: impl Into<String>) -> Self {
        Self {
            base_packages: vec![base_package.into()],
            exclude_filters: Vec::new(),
        }
    }

    pub fn base_package(mut self, base_package: impl Into<String>) -> Self {
        self.base_packages.push(base_package.into());
        self
    }

    pub fn exclude(mut self, filter: ScanFilter) -> Self {
        self.exclude_filters.push(filter);
        self
    }

    pub fn candidates(&self) -> Vec<&'static ComponentRegistration> {
        inventory::iter::<ComponentRegistration>
            .into_iter()
            .filter(|registration| {
                self.base_packages
                    .iter()
                    .any(|base| in_package(registration.module_path, base))
            })
            .filter(|registration| {
                let excluded = self
                    .exclude_filters
                    .iter()
                    .any(|filter| filter.matches(registration));
                if excluded {
                    tracing::trace!(
                        component = %registration.qualified_name(),
                        "Excluded by filter"
                    );
                }
                !excluded
            })
            .collect()
    }

    /// 候補のビーン定義をビルダーに登録する
    pub fn register(&self, builder: ContextBuilder) -> ContextBuilder {
        let candidates = self.candidates();
        tracing::debug!(
            base_packages = ?self.base_packages,
            count = candidates.len(),
            "Component scan finished"
        );

        builder.register_all(candidates.into_iter().map(|registration| {
            tracing::debug!(
                component = %registration.qualified_name(),
                bean = %registration.bean_name(),
                "Identified candidate component"
            );
            registration.definition()
        }))
    }
}

fn in_package(module_path: &str, base_package: &str) -> bool {
    module_path == base_package
        || module_path
            .strip_prefix(base_package)
            .is_some_and(|rest| rest.starts_with("::"))
}

/// 型名からビーン名を作る
///
/// 先頭の一文字を小文字にする。ただし先頭二文字がどちらも大文字なら
/// そのまま返す（`URLService` → `URLService`）。
pub fn default_bean_name(type_name: &str) -> String {
    let simple = type_name.rsplit("::").next().unwrap_or(type_name);
    let mut chars = simple.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && second.is_uppercase() => {
            simple.to_string()
        }
        (Some(first), _) => {
            let mut name: String = first.to_lowercase().collect();
            name.push_str(&simple[first.len_utf8()..]);
            name
        }
        (None, _) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bean_name() {
        assert_eq!(default_bean_name("MemoryMemberRepository"), "memoryMemberRepository");
        assert_eq!(default_bean_name("RateDiscountPolicy"), "rateDiscountPolicy");
        assert_eq!(default_bean_name("URLService"), "URLService");
        assert_eq!(default_bean_name("a::b::OrderService"), "orderService");
        assert_eq!(default_bean_name("X"), "x");
        assert_eq!(default_bean_name(""), "");
    }

    #[test]
    fn test_in_package() {
        assert!(in_package("demo", "demo"));
        assert!(in_package("demo::member", "demo"));
        assert!(!in_package("demo_other::member", "demo"));
        assert!(!in_package("other", "demo"));
    }

    #[test]
    fn test_scan_finds_every_stereotype() {
        let candidates = ComponentScan::new(env!("CARGO_CRATE_NAME")).candidates();
        for stereotype in [
            Stereotype::Component,
            Stereotype::Service,
            Stereotype::Repository,
            Stereotype::Configuration,
        ] {
            assert!(
                candidates.iter().any(|r| r.is_annotated(stereotype)),
                "no candidate annotated with {:?}",
                stereotype
            );
        }
    }
}
