use crate::adapters::memory::MemoryMemberRepository;
use crate::application::member::MemberService;
use crate::application::order::{DiscountService, OrderService};
use crate::container::{
    BeanDefinition, BeanResolver, BeanRole, ComponentRegistration, Configuration, ContextBuilder,
    Result, Stereotype,
};
use crate::domain::{DiscountPolicy, FixDiscountPolicy, RateDiscountPolicy};
use crate::ports::MemberRepository;
use crate::settings::{AppSettings, DiscountPolicyKind};
use std::sync::Arc;

pub const APP_SETTINGS: &str = "appSettings";
pub const MEMBER_SERVICE: &str = "memberService";
pub const MEMBER_REPOSITORY: &str = "memberRepository";
pub const ORDER_SERVICE: &str = "orderService";
pub const DISCOUNT_POLICY: &str = "discountPolicy";
pub const DISCOUNT_SERVICE: &str = "discountService";

/// 明示的な設定
///
/// ビーンごとに生成関数を一つ宣言する。生成関数は兄弟ビーンを
/// [`BeanResolver`] から受け取るため、`memberRepository` は
/// `memberService` と `orderService` の両方から参照されても一度しか生成されない。
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    settings: AppSettings,
}

impl AppConfig {
    pub fn new(settings: AppSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn member_service(resolver: &mut BeanResolver<'_>) -> Result<Arc<MemberService>> {
        tracing::info!("call AppConfig.memberService");
        Ok(Arc::new(MemberService::new(
            resolver.get_named::<dyn MemberRepository>(MEMBER_REPOSITORY)?,
        )))
    }

    pub fn member_repository(_: &mut BeanResolver<'_>) -> Result<Arc<dyn MemberRepository>> {
        tracing::info!("call AppConfig.memberRepository");
        Ok(Arc::new(MemoryMemberRepository::new()))
    }

    pub fn order_service(resolver: &mut BeanResolver<'_>) -> Result<Arc<OrderService>> {
        tracing::info!("call AppConfig.orderService");
        Ok(Arc::new(OrderService::new(
            resolver.get_named::<dyn MemberRepository>(MEMBER_REPOSITORY)?,
            resolver.get_named::<dyn DiscountPolicy>(DISCOUNT_POLICY)?,
        )))
    }

    /// 設定で選ばれた割引ポリシー（どちらか一方だけが有効）
    pub fn discount_policy(resolver: &mut BeanResolver<'_>) -> Result<Arc<dyn DiscountPolicy>> {
        tracing::info!("call AppConfig.discountPolicy");
        let settings = resolver.get::<AppSettings>()?;
        let policy: Arc<dyn DiscountPolicy> = match settings.discount.policy {
            DiscountPolicyKind::Fix => Arc::new(FixDiscountPolicy::new(settings.discount.fix_amount)),
            DiscountPolicyKind::Rate => {
                Arc::new(RateDiscountPolicy::new(settings.discount.rate_percent))
            }
        };
        Ok(policy)
    }

    pub fn discount_service(resolver: &mut BeanResolver<'_>) -> Result<Arc<DiscountService>> {
        tracing::info!("call AppConfig.discountService");
        Ok(Arc::new(DiscountService::new(
            resolver.get_all::<dyn DiscountPolicy>()?,
        )))
    }
}

impl Configuration for AppConfig {
    fn register_beans(&self, builder: ContextBuilder) -> ContextBuilder {
        builder
            .register(settings_definition(&self.settings))
            .register(BeanDefinition::new(MEMBER_SERVICE, Self::member_service))
            .register(BeanDefinition::new(MEMBER_REPOSITORY, Self::member_repository).primary())
            .register(BeanDefinition::new(ORDER_SERVICE, Self::order_service))
            .register(BeanDefinition::new(DISCOUNT_POLICY, Self::discount_policy).primary())
            .register(BeanDefinition::new(DISCOUNT_SERVICE, Self::discount_service))
    }
}

/// 設定値をインフラ用ビーンとして登録する定義
pub(crate) fn settings_definition(settings: &AppSettings) -> BeanDefinition {
    let settings = Arc::new(settings.clone());
    BeanDefinition::new(APP_SETTINGS, move |_| Ok(Arc::clone(&settings)))
        .with_role(BeanRole::Infrastructure)
}

// 設定クラス自身もコンポーネントとして登録されるが、スキャン側で除外される。
inventory::submit! {
    ComponentRegistration::new(
        module_path!(),
        "AppConfig",
        &[Stereotype::Configuration],
        app_config_definition,
    )
}

fn app_config_definition(name: String) -> BeanDefinition {
    BeanDefinition::new(name, |resolver| {
        let settings = resolver.get::<AppSettings>()?;
        Ok(Arc::new(AppConfig::new((*settings).clone())))
    })
}
