//! The four gateway operations.

use http::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::card::{
    CardPayment, CreditCard, bin_of, mask, validate_card as check_card_fields, validate_payment,
};
use crate::config::defaults;
use crate::time::{Clock, Sleeper, SystemClock, TokioSleeper, current_year};
use crate::transport::{
    BackoffSchedule, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestClient,
    RetryingClient, TransportError,
};

use super::wire::{
    CardBinResponse, CardTokenResponse, SaleRequest, SaleResponse, TokenizeRequest,
    ZeroAuthRequest, ZeroAuthResponse, non_empty,
};
use super::{GatewayConfig, GatewayError};

/// Client for the payment gateway.
///
/// Every operation follows the same pipeline: validate the input, build the
/// JSON payload, send it through a [`RetryingClient`], require the exact
/// status code the operation expects, then decode the body and check the
/// field the caller needs. Nothing is retried above the transport layer.
///
/// All operations take `&self`; the client holds only immutable state and
/// can be shared across tasks (for instance behind an `Arc`).
///
/// # Type Parameters
///
/// - `H`: The single-attempt HTTP client
/// - `S`: The sleeper used for backoff delays (defaults to [`TokioSleeper`])
/// - `C`: The clock providing the current year (defaults to [`SystemClock`])
///
/// # Example
///
/// ```no_run
/// use cielo_gateway::card::{CardPayment, CreditCard};
/// use cielo_gateway::gateway::{GatewayClient, GatewayConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GatewayConfig::new(
///     "merchant-id",
///     "merchant-key",
///     "https://apisandbox.cieloecommerce.cielo.com.br",
///     "https://apiquerysandbox.cieloecommerce.cielo.com.br",
/// )?;
/// let client = GatewayClient::connect(config)?;
///
/// let card = CreditCard::new("4551870000000183", "Ada Lovelace", 12, 2030, "123");
/// let payment = CardPayment::new("order1", 1569, 1, "MYSHOP");
/// let payment_id = client.process_payment(&payment, &card).await?;
/// println!("{payment_id}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GatewayClient<H, S = TokioSleeper, C = SystemClock> {
    config: GatewayConfig,
    transport: RetryingClient<H, S>,
    clock: C,
}

impl GatewayClient<ReqwestClient> {
    /// Creates a client over a [`ReqwestClient`] whose attempts time out
    /// after 30 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HttpClient`] if the HTTP client cannot be built.
    pub fn connect(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = ReqwestClient::with_timeout(defaults::request_timeout())
            .map_err(GatewayError::HttpClient)?;
        Ok(Self::new(http, config))
    }
}

impl<H> GatewayClient<H> {
    /// Creates a client with the default backoff schedule, real sleeps and
    /// the system clock.
    #[must_use]
    pub fn new(http: H, config: GatewayConfig) -> Self {
        Self {
            config,
            transport: RetryingClient::new(http),
            clock: SystemClock,
        }
    }
}

impl<H, S, C> GatewayClient<H, S, C> {
    /// Sets a custom sleeper for backoff delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> GatewayClient<H, S2, C> {
        GatewayClient {
            config: self.config,
            transport: self.transport.with_sleeper(sleeper),
            clock: self.clock,
        }
    }

    /// Sets the clock used to decide which expiration years are in the past.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> GatewayClient<H, S, C2> {
        GatewayClient {
            config: self.config,
            transport: self.transport,
            clock,
        }
    }

    /// Sets the backoff schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: BackoffSchedule) -> Self {
        self.transport = self.transport.with_schedule(schedule);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Returns the backoff schedule.
    #[must_use]
    pub const fn schedule(&self) -> &BackoffSchedule {
        self.transport.schedule()
    }

    /// Returns the underlying single-attempt HTTP client.
    #[must_use]
    pub const fn http(&self) -> &H {
        self.transport.inner()
    }
}

impl<H: HttpClient, S: Sleeper, C: Clock> GatewayClient<H, S, C> {
    /// Looks up the card brand (`Visa`, `Master`, `Elo`, ...) from the first
    /// nine characters of `card_number`.
    ///
    /// The number is not validated: only its prefix leaves the process.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Transport`] if no acceptable response arrives
    /// - [`GatewayError::UnexpectedStatus`] unless the gateway answers 200
    /// - [`GatewayError::Decode`] if the body is not JSON
    /// - [`GatewayError::IncompleteBody`] if the body is cut short
    /// - [`GatewayError::MissingField`] if `Provider` is absent or empty
    pub async fn detect_brand(&self, card_number: &str) -> Result<String, GatewayError> {
        let bin = bin_of(card_number);
        tracing::debug!(bin = %mask(&bin), "Detecting card brand");

        let url = self.config.query_endpoint(&["1", "cardBin", &bin])?;
        let response = self.exchange(HttpRequest::get(url), StatusCode::OK).await?;
        let body: CardBinResponse = decode(&response.body)?;

        let brand = non_empty(body.provider).ok_or(GatewayError::MissingField {
            field: "Provider",
        })?;
        tracing::info!(brand = %brand, "Card brand detected");
        Ok(brand)
    }

    /// Checks that `card` can be charged, using a zero-value authorization.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Validation`] if a card field is invalid; nothing is sent
    /// - [`GatewayError::CardRejected`] if the gateway reports the card invalid
    /// - transport, status and decode errors as for [`Self::detect_brand`]
    pub async fn validate_card(&self, card: &CreditCard) -> Result<(), GatewayError> {
        self.check_card(card)?;
        tracing::debug!(card = %card.masked_number(), "Validating card");

        let url = self.config.command_endpoint(&["1", "zeroauth"])?;
        let request = HttpRequest::post(url).with_body(encode(&ZeroAuthRequest::new(card))?);
        let response = self.exchange(request, StatusCode::OK).await?;
        let body: ZeroAuthResponse = decode(&response.body)?;

        if !body.is_valid() {
            tracing::warn!(
                card = %card.masked_number(),
                code = body.return_code.as_deref().unwrap_or_default(),
                message = body.return_message.as_deref().unwrap_or_default(),
                "Card rejected"
            );
            return Err(GatewayError::CardRejected {
                reason: non_empty(body.return_message),
                code: non_empty(body.return_code),
            });
        }

        tracing::info!(card = %card.masked_number(), "Card is valid");
        Ok(())
    }

    /// Stores `card` on the gateway and returns the opaque token that
    /// refers to it.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Validation`] if a card field is invalid; nothing is sent
    /// - [`GatewayError::UnexpectedStatus`] unless the gateway answers 201
    /// - [`GatewayError::MissingField`] if `CardToken` is absent or empty
    /// - transport and decode errors as for [`Self::detect_brand`]
    pub async fn tokenize_card(
        &self,
        customer_name: &str,
        card: &CreditCard,
    ) -> Result<String, GatewayError> {
        self.check_card(card)?;
        tracing::debug!(card = %card.masked_number(), "Tokenizing card");

        let url = self.config.command_endpoint(&["1", "card"])?;
        let payload = TokenizeRequest::new(customer_name, card);
        let request = HttpRequest::post(url).with_body(encode(&payload)?);
        let response = self.exchange(request, StatusCode::CREATED).await?;
        let body: CardTokenResponse = decode(&response.body)?;

        let token = non_empty(body.card_token).ok_or(GatewayError::MissingField {
            field: "CardToken",
        })?;
        tracing::info!(card = %card.masked_number(), "Card tokenized");
        Ok(token)
    }

    /// Charges `card` for `payment` with immediate capture and returns the
    /// gateway's payment id.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Validation`] if a card or payment field is invalid;
    ///   nothing is sent
    /// - [`GatewayError::UnexpectedStatus`] unless the gateway answers 201
    /// - [`GatewayError::PaymentIdUnrecoverable`] if the gateway answered 201
    ///   but the payment id cannot be read, even when the body was cut short.
    ///   The charge may have gone through; see
    ///   [`GatewayError::is_outcome_unknown`]
    /// - transport errors as for [`Self::detect_brand`]
    pub async fn process_payment(
        &self,
        payment: &CardPayment,
        card: &CreditCard,
    ) -> Result<String, GatewayError> {
        self.check_card(card)?;
        validate_payment(payment)?;
        tracing::debug!(
            order_id = %payment.order_id,
            amount = payment.amount,
            installments = payment.installments,
            card = %card.masked_number(),
            "Processing payment"
        );

        let url = self.config.command_endpoint(&["1", "sales"])?;
        let request = HttpRequest::post(url).with_body(encode(&SaleRequest::new(payment, card))?);
        let payment_id = match self.exchange(request, StatusCode::CREATED).await {
            Ok(response) => read_payment_id(&response.body),
            Err(GatewayError::IncompleteBody(e)) => Err(GatewayError::PaymentIdUnrecoverable {
                source: Some(Box::new(e)),
            }),
            Err(e) => return Err(e),
        };

        match payment_id {
            Ok(id) => {
                tracing::info!(order_id = %payment.order_id, payment_id = %id, "Payment captured");
                Ok(id)
            }
            Err(e) => {
                tracing::error!(
                    order_id = %payment.order_id,
                    "Payment confirmed but its id is unreadable; reconcile before retrying"
                );
                Err(e)
            }
        }
    }

    fn check_card(&self, card: &CreditCard) -> Result<(), GatewayError> {
        check_card_fields(card, current_year(&self.clock)).map_err(|e| {
            tracing::debug!(field = e.field(), error = %e, "Card rejected before sending");
            GatewayError::from(e)
        })
    }

    /// Sends `request` with the merchant headers and requires `expected`.
    async fn exchange(
        &self,
        request: HttpRequest,
        expected: StatusCode,
    ) -> Result<HttpResponse, GatewayError> {
        let request = request.with_headers(self.config.headers());
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(TransportError::Incomplete {
                source: HttpError::Body { status, .. },
                ..
            }) if status != expected => return Err(unexpected_status(status, expected)),
            Err(e @ TransportError::Incomplete { .. }) => {
                return Err(GatewayError::IncompleteBody(e));
            }
            Err(e) => return Err(e.into()),
        };

        if response.status != expected {
            return Err(unexpected_status(response.status, expected));
        }

        Ok(response)
    }
}

fn unexpected_status(status: StatusCode, expected: StatusCode) -> GatewayError {
    tracing::warn!(
        status = status.as_u16(),
        expected = expected.as_u16(),
        "Unexpected gateway status"
    );
    GatewayError::UnexpectedStatus { status, expected }
}

/// A 201 sale is confirmed, so any failure to read its id is unrecoverable.
fn read_payment_id(body: &[u8]) -> Result<String, GatewayError> {
    match serde_json::from_slice::<SaleResponse>(body) {
        Ok(body) => body
            .into_payment_id()
            .ok_or(GatewayError::PaymentIdUnrecoverable { source: None }),
        Err(e) => Err(GatewayError::PaymentIdUnrecoverable {
            source: Some(Box::new(e)),
        }),
    }
}

fn encode(payload: &impl Serialize) -> Result<Vec<u8>, GatewayError> {
    serde_json::to_vec(payload).map_err(GatewayError::Encode)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(body).map_err(GatewayError::Decode)
}
