use member_order_di::{
    application::{
        member::MemberService,
        order::{DiscountService, OrderService},
    },
    configuration::build_context,
    domain::{Grade, Member, MemberId},
    settings::AppSettings,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "member_order_di=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = AppSettings::from_env()?;
    tracing::info!(?settings, "Settings loaded");

    // Build the singleton graph
    let context = build_context(&settings)?;
    tracing::info!(beans = ?context.bean_definition_names(), "Application context ready");

    // Member
    let member_service = context.get_bean::<MemberService>()?;
    let member_id = MemberId::new();
    member_service
        .join(Member::new(member_id, "memberA", Grade::Vip))
        .await?;

    let found = member_service.find_member(member_id).await?;
    tracing::info!(?found, "Found member");

    // Order
    let order_service = context.get_bean::<OrderService>()?;
    let order = order_service.create_order(member_id, "itemA", 10000).await?;
    tracing::info!(order = %order, price = order.calculate_price(), "Order");
    tracing::info!("{}", serde_json::to_string_pretty(&order)?);

    // Every registered discount policy
    let discount_service = context.get_bean::<DiscountService>()?;
    if let Some(member) = found {
        for policy_name in discount_service.policy_names() {
            let discount = discount_service.discount(&member, 20000, policy_name)?;
            tracing::info!(policy_name, discount, "Discount for 20000");
        }
    }

    Ok(())
}
