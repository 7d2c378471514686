//! Checkout flow.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::StoreConfig,
    domain::{
        carts::Cart,
        checkout::{errors::CheckoutError, shipping::ShippingInfo, totals::OrderTotals},
        orders::{NewOrder, NewOrderItem, OrderStatus, OrdersRepository},
        payments::{Msisdn, PaymentAck, PaymentsError, PaymentsGateway},
    },
    money,
};

/// Artisan attribution used when a cart line arrived without one.
const DEFAULT_ARTISAN_ID: &str = "unknown";

/// The checkout stages. The stage is the sole discriminant of what the
/// buyer is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Collecting shipping details.
    Shipping,
    /// Collecting the payment number and submitting the order.
    Payment,
    /// Terminal. The order exists and a payment prompt went out (or demo
    /// mode stood in for it).
    Confirmation,
}

/// What the confirmation stage displays. Purely presentational; no further
/// backend interaction happens from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Display reference for the order, generated client-side.
    pub order_reference: String,

    /// Backend identifier of the created order.
    pub order_id: String,

    /// Email captured in the shipping stage.
    pub email: String,

    /// Whether the payment acknowledgement was simulated because the gateway
    /// was unreachable.
    pub demo_mode: bool,
}

/// Outcome of a payment submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentSubmission {
    /// The order was placed and the flow advanced to confirmation.
    Completed(Confirmation),

    /// A submission was already in flight; this one did nothing.
    AlreadyInFlight,
}

/// Drives a buyer through Shipping → Payment → Confirmation exactly once.
///
/// The flow owns the transient checkout state (stage, shipping details, the
/// in-flight flag) and performs the side-effecting order and payment calls
/// in strict sequence. It is constructed per checkout attempt with its
/// collaborators injected.
pub struct CheckoutFlow {
    config: StoreConfig,
    orders: Arc<dyn OrdersRepository>,
    payments: Arc<dyn PaymentsGateway>,
    stage: Stage,
    shipping: Option<ShippingInfo>,
    processing: bool,
    confirmation: Option<Confirmation>,
}

impl CheckoutFlow {
    /// Create a flow at the shipping stage.
    #[must_use]
    pub fn new(
        config: StoreConfig,
        orders: Arc<dyn OrdersRepository>,
        payments: Arc<dyn PaymentsGateway>,
    ) -> Self {
        Self {
            config,
            orders,
            payments,
            stage: Stage::Shipping,
            shipping: None,
            processing: false,
            confirmation: None,
        }
    }

    /// The current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Shipping details entered so far. Retained across a back transition.
    pub fn shipping(&self) -> Option<&ShippingInfo> {
        self.shipping.as_ref()
    }

    /// The confirmation, once the flow reached the terminal stage.
    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// Whether a payment submission is in flight. Render the submit control
    /// disabled while this is true.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Totals for the given cart under this flow's configuration.
    ///
    /// The same computation feeds the order submission, so the displayed
    /// and persisted totals cannot drift.
    pub fn totals(&self, cart: &Cart) -> OrderTotals {
        OrderTotals::compute(cart.subtotal(), &self.config)
    }

    /// Submit the shipping form and advance to the payment stage.
    ///
    /// Pure state transition; nothing is sent to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there is nothing to check
    /// out (callers leave checkout), [`CheckoutError::StageMismatch`] outside
    /// the shipping stage, or a [`CheckoutError::Shipping`] validation
    /// failure.
    pub fn submit_shipping(
        &mut self,
        cart: &Cart,
        info: ShippingInfo,
    ) -> Result<(), CheckoutError> {
        if self.stage != Stage::Shipping {
            return Err(CheckoutError::StageMismatch);
        }

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        info.validate()?;

        self.shipping = Some(info);
        self.stage = Stage::Payment;

        Ok(())
    }

    /// Return from the payment stage to the shipping form. Entered values
    /// are retained.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::StageMismatch`] outside the payment stage;
    /// there is no backward transition from confirmation.
    pub fn back_to_shipping(&mut self) -> Result<(), CheckoutError> {
        if self.stage != Stage::Payment {
            return Err(CheckoutError::StageMismatch);
        }

        self.stage = Stage::Shipping;

        Ok(())
    }

    /// Submit the payment form: persist the order, clear the cart and push
    /// the payment prompt, in that order.
    ///
    /// While a submission is in flight further calls return
    /// [`PaymentSubmission::AlreadyInFlight`] without side effects, so a
    /// double-click cannot create two orders. The in-flight flag is cleared
    /// on every exit path.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::StageMismatch`] outside the payment stage,
    /// [`CheckoutError::EmptyCart`] when the cart emptied meanwhile, an
    /// [`CheckoutError::Orders`] failure (cart left intact for retry), a
    /// [`CheckoutError::PaymentDeclined`] business rejection, or a
    /// [`CheckoutError::Payments`] hard failure.
    #[tracing::instrument(name = "checkout.submit_payment", skip_all, err)]
    pub async fn submit_payment(
        &mut self,
        cart: &mut Cart,
        phone: &Msisdn,
    ) -> Result<PaymentSubmission, CheckoutError> {
        if self.stage != Stage::Payment {
            return Err(CheckoutError::StageMismatch);
        }

        if self.processing {
            return Ok(PaymentSubmission::AlreadyInFlight);
        }

        self.processing = true;
        let result = self.place_order(cart, phone).await;
        self.processing = false;

        let confirmation = result?;

        self.stage = Stage::Confirmation;
        self.confirmation = Some(confirmation.clone());

        Ok(PaymentSubmission::Completed(confirmation))
    }

    async fn place_order(
        &self,
        cart: &mut Cart,
        phone: &Msisdn,
    ) -> Result<Confirmation, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let Some(shipping) = &self.shipping else {
            return Err(CheckoutError::StageMismatch);
        };

        let lines = cart.items().to_vec();
        let totals = OrderTotals::compute(cart.subtotal(), &self.config);

        let created = self
            .orders
            .create_order(&NewOrder {
                total_amount: totals.total,
                status: OrderStatus::Pending,
            })
            .await?;

        // One line at a time: if line N fails, lines 1..N-1 are known to
        // exist server-side and the buyer sees the failure with the cart
        // intact.
        for line in &lines {
            self.orders
                .create_order_item(&NewOrderItem {
                    order_id: created.id.clone(),
                    product_id: line.product_id.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    total_price: money::to_cents(line.line_total()),
                    artisan_id: line
                        .artisan_id
                        .clone()
                        .unwrap_or_else(|| DEFAULT_ARTISAN_ID.to_string()),
                })
                .await?;
        }

        // Best-effort: the order already exists server-side, so a failed
        // remote clear must not resurface the bought items locally.
        let cleared = cart.clear().await;

        if let Err(error) = cleared {
            warn!(%error, "cart clear failed after order creation");
            cart.reset();
        }

        let demo_mode = match self.payments.initiate_stk_push(&created.id, phone).await {
            Ok(PaymentAck::Accepted { .. }) => false,
            Ok(PaymentAck::Rejected { reason }) => {
                return Err(CheckoutError::PaymentDeclined(reason));
            }
            Err(PaymentsError::Unavailable(source)) if self.config.demo_payment_fallback => {
                warn!(%source, "payment gateway unreachable, acknowledging in demo mode");
                true
            }
            Err(error) => return Err(error.into()),
        };

        info!(order_id = %created.id, demo_mode, "checkout completed");

        Ok(Confirmation {
            order_reference: order_reference(),
            order_id: created.id,
            email: shipping.email.clone(),
            demo_mode,
        })
    }
}

/// Generate the display reference shown on the confirmation stage.
fn order_reference() -> String {
    let id = Uuid::new_v4().simple().to_string();
    let short: String = id.chars().take(8).collect();

    format!("SD-{}", short.to_uppercase())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::{
        carts::{CartItem, repository::MockCartsRepository},
        orders::MockOrdersRepository,
        payments::MockPaymentsGateway,
    };

    use super::*;

    fn shipping_info() -> ShippingInfo {
        ShippingInfo {
            full_name: "Amina Wanjiru".into(),
            email: "amina@example.com".into(),
            phone: "254712345678".into(),
            address: "Moi Avenue 12".into(),
            city: "Nairobi".into(),
            state: "Nairobi County".into(),
            postal_code: "00100".into(),
            country: "Kenya".into(),
        }
    }

    fn line(id: &str, unit_price: Decimal, quantity: u32) -> CartItem {
        CartItem {
            id: id.to_string(),
            product_id: format!("product-{id}"),
            title: "Kiondo basket".to_string(),
            unit_price,
            quantity,
            image_url: None,
            artisan_id: None,
        }
    }

    async fn loaded_cart(lines: Vec<CartItem>) -> Cart {
        let mut repository = MockCartsRepository::new();
        repository
            .expect_fetch_cart()
            .times(1)
            .returning(move || Ok(lines.clone()));

        let mut cart = Cart::new(Arc::new(repository));
        cart.load().await;

        cart
    }

    fn flow() -> CheckoutFlow {
        CheckoutFlow::new(
            StoreConfig::new("http://store"),
            Arc::new(MockOrdersRepository::new()),
            Arc::new(MockPaymentsGateway::new()),
        )
    }

    #[tokio::test]
    async fn starts_at_shipping() {
        let flow = flow();

        assert_eq!(flow.stage(), Stage::Shipping);
        assert!(flow.shipping().is_none());
        assert!(!flow.is_processing());
    }

    #[tokio::test]
    async fn shipping_submission_advances_to_payment() {
        let cart = loaded_cart(vec![line("c1", Decimal::new(45, 0), 1)]).await;
        let mut flow = flow();

        flow.submit_shipping(&cart, shipping_info())
            .expect("shipping should validate");

        assert_eq!(flow.stage(), Stage::Payment);
        assert_eq!(
            flow.shipping().map(|info| info.email.as_str()),
            Some("amina@example.com")
        );
    }

    #[tokio::test]
    async fn empty_cart_aborts_shipping() {
        let cart = loaded_cart(Vec::new()).await;
        let mut flow = flow();

        let result = flow.submit_shipping(&cart, shipping_info());

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
        assert_eq!(flow.stage(), Stage::Shipping);
    }

    #[tokio::test]
    async fn blank_shipping_field_keeps_the_stage() {
        let cart = loaded_cart(vec![line("c1", Decimal::new(45, 0), 1)]).await;
        let mut flow = flow();

        let mut info = shipping_info();
        info.postal_code = String::new();

        let result = flow.submit_shipping(&cart, info);

        assert!(
            matches!(result, Err(CheckoutError::Shipping(_))),
            "expected Shipping validation error, got {result:?}"
        );
        assert_eq!(flow.stage(), Stage::Shipping);
    }

    #[tokio::test]
    async fn back_retains_entered_shipping() {
        let cart = loaded_cart(vec![line("c1", Decimal::new(45, 0), 1)]).await;
        let mut flow = flow();

        flow.submit_shipping(&cart, shipping_info())
            .expect("shipping should validate");
        flow.back_to_shipping().expect("back should be permitted");

        assert_eq!(flow.stage(), Stage::Shipping);
        assert_eq!(flow.shipping(), Some(&shipping_info()));
    }

    #[tokio::test]
    async fn back_is_only_available_from_payment() {
        let mut flow = flow();

        let result = flow.back_to_shipping();

        assert!(
            matches!(result, Err(CheckoutError::StageMismatch)),
            "expected StageMismatch, got {result:?}"
        );
    }

    #[tokio::test]
    async fn payment_outside_payment_stage_is_rejected() {
        let mut cart = loaded_cart(vec![line("c1", Decimal::new(45, 0), 1)]).await;
        let mut flow = flow();

        let phone: Msisdn = "254712345678".parse().expect("number should parse");
        let result = flow.submit_payment(&mut cart, &phone).await;

        assert!(
            matches!(result, Err(CheckoutError::StageMismatch)),
            "expected StageMismatch, got {result:?}"
        );
    }

    #[tokio::test]
    async fn in_flight_submission_ignores_the_second_click() {
        let mut cart = loaded_cart(vec![line("c1", Decimal::new(45, 0), 1)]).await;
        let mut flow = flow();

        flow.submit_shipping(&cart, shipping_info())
            .expect("shipping should validate");

        // Simulate the first click still being in flight. The mocks carry no
        // expectations, so any side effect would panic the test.
        flow.processing = true;

        let phone: Msisdn = "254712345678".parse().expect("number should parse");
        let result = flow.submit_payment(&mut cart, &phone).await;

        assert!(
            matches!(result, Ok(PaymentSubmission::AlreadyInFlight)),
            "expected AlreadyInFlight, got {result:?}"
        );
        assert_eq!(flow.stage(), Stage::Payment);
    }

    #[tokio::test]
    async fn processing_clears_after_a_failed_submission() {
        let mut cart = loaded_cart(Vec::new()).await;
        let mut flow = flow();

        flow.stage = Stage::Payment;
        flow.shipping = Some(shipping_info());

        let phone: Msisdn = "254712345678".parse().expect("number should parse");
        let result = flow.submit_payment(&mut cart, &phone).await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
        assert!(!flow.is_processing(), "flag must clear on failure");
    }

    #[test]
    fn order_reference_has_the_display_shape() {
        let reference = order_reference();

        assert!(reference.starts_with("SD-"), "got {reference}");
        assert_eq!(reference.len(), 11);
    }
}
