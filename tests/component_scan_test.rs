use member_order_di::application::member::MemberService;
use member_order_di::application::order::{DiscountService, OrderService};
use member_order_di::configuration::{AutoAppConfig, BASE_PACKAGE};
use member_order_di::container::{
    ApplicationContext, ComponentScan, ContainerError, ContextBuilder, ScanFilter, Stereotype,
};
use member_order_di::domain::{DiscountPolicy, Grade, Member, MemberId};
use member_order_di::ports::MemberRepository;
use member_order_di::settings::{AppSettings, ConfigurationStyle, DiscountPolicyKind};
use std::sync::Arc;

mod common;

fn scan_context() -> ApplicationContext {
    let settings = common::settings(ConfigurationStyle::Scan, DiscountPolicyKind::Rate);
    ApplicationContext::from_configuration(&AutoAppConfig::new(settings)).unwrap()
}

#[test]
fn test_scan_registers_components() {
    let context = scan_context();

    for name in [
        "memoryMemberRepository",
        "fixDiscountPolicy",
        "rateDiscountPolicy",
        "memberService",
        "orderService",
        "discountService",
    ] {
        assert!(context.contains_bean(name), "missing bean {}", name);
    }
}

#[test]
fn test_scan_never_registers_configuration_types() {
    let context = scan_context();

    assert!(!context.contains_bean("appConfig"));
    assert!(!context.contains_bean("autoAppConfig"));

    let candidates = AutoAppConfig::default().component_scan().candidates();
    assert!(!candidates.is_empty());
    assert!(
        candidates
            .iter()
            .all(|registration| !registration.is_annotated(Stereotype::Configuration))
    );
}

#[test]
fn test_scan_without_exclusion_finds_configuration_types() {
    let names: Vec<String> = ComponentScan::new(BASE_PACKAGE)
        .candidates()
        .iter()
        .map(|registration| registration.bean_name())
        .collect();

    assert!(names.contains(&"appConfig".to_string()));
    assert!(names.contains(&"autoAppConfig".to_string()));
}

#[test]
fn test_scan_limited_to_base_package() {
    let domain_package = format!("{}::domain", BASE_PACKAGE);
    let mut names: Vec<String> = ComponentScan::new(domain_package)
        .candidates()
        .iter()
        .map(|registration| registration.bean_name())
        .collect();
    names.sort();

    assert_eq!(names, vec!["fixDiscountPolicy", "rateDiscountPolicy"]);
}

#[test]
fn test_scan_type_name_filter() {
    let candidates = ComponentScan::new(BASE_PACKAGE)
        .exclude(ScanFilter::Annotation(Stereotype::Configuration))
        .exclude(ScanFilter::TypeName("FixDiscountPolicy".to_string()))
        .candidates();

    assert!(candidates.iter().all(|r| r.type_name != "FixDiscountPolicy"));
    assert!(candidates.iter().any(|r| r.type_name == "RateDiscountPolicy"));
}

#[test]
fn test_primary_rate_discount_policy_is_injected() {
    let context = scan_context();

    let primary = context.get_bean::<dyn DiscountPolicy>().unwrap();
    let rate = context
        .get_bean_by_name::<dyn DiscountPolicy>("rateDiscountPolicy")
        .unwrap();
    let order_service = context.get_bean::<OrderService>().unwrap();

    assert!(Arc::ptr_eq(&primary, &rate));
    assert!(Arc::ptr_eq(order_service.discount_policy(), &rate));
    assert!(context.bean_info("rateDiscountPolicy").unwrap().primary);
    assert!(!context.bean_info("fixDiscountPolicy").unwrap().primary);
}

#[test]
fn test_scanned_repository_is_shared() {
    let context = scan_context();

    let repository = context.get_bean::<dyn MemberRepository>().unwrap();
    let member_service = context.get_bean::<MemberService>().unwrap();
    let order_service = context.get_bean::<OrderService>().unwrap();

    assert!(Arc::ptr_eq(member_service.member_repository(), &repository));
    assert!(Arc::ptr_eq(order_service.member_repository(), &repository));
}

#[test]
fn test_all_discount_policies_by_name() {
    let context = scan_context();

    let policies = context.get_beans_of_type::<dyn DiscountPolicy>();
    assert_eq!(policies.len(), 2);

    let discount_service = context.get_bean::<DiscountService>().unwrap();
    assert_eq!(
        discount_service.policy_names(),
        vec!["fixDiscountPolicy", "rateDiscountPolicy"]
    );

    let member = Member::new(MemberId::new(), "userA", Grade::Vip);
    assert_eq!(
        discount_service
            .discount(&member, 20000, "fixDiscountPolicy")
            .unwrap(),
        1000
    );
    assert_eq!(
        discount_service
            .discount(&member, 20000, "rateDiscountPolicy")
            .unwrap(),
        2000
    );
}

#[test]
fn test_scanned_policies_use_settings() {
    let mut settings = AppSettings::default();
    settings.discount.fix_amount = 3000;
    settings.discount.rate_percent = 20;
    let context = ApplicationContext::from_configuration(&AutoAppConfig::new(settings)).unwrap();

    let member = Member::new(MemberId::new(), "userA", Grade::Vip);
    let policies = context.get_beans_of_type::<dyn DiscountPolicy>();
    assert_eq!(policies["fixDiscountPolicy"].discount(&member, 10000), 3000);
    assert_eq!(policies["rateDiscountPolicy"].discount(&member, 10000), 2000);
}

#[test]
fn test_scan_without_primary_is_ambiguous() {
    // プライマリ指定を外した定義を並べると解決できない
    let registrations = ComponentScan::new(format!("{}::domain", BASE_PACKAGE)).candidates();
    let builder = registrations.iter().fold(ContextBuilder::new(), |builder, r| {
        builder.register((r.define)(r.bean_name()))
    });
    let builder = ComponentScan::new(format!("{}::application::order", BASE_PACKAGE))
        .base_package(format!("{}::adapters", BASE_PACKAGE))
        .register(builder);

    match builder.build() {
        Err(ContainerError::NoUniqueBean { mut candidates, .. }) => {
            candidates.sort();
            assert_eq!(candidates, vec!["fixDiscountPolicy", "rateDiscountPolicy"]);
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}
