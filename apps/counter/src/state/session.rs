//! # Bill Session State
//!
//! Everything that belongs to the bill currently being built at the
//! counter: the cart, the staged operator input, the customer fields,
//! and the in-flight submission guard.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bill Session Lifecycle                           │
//! │                                                                         │
//! │  stage input ──► add to cart ──► (repeat) ──► submit                    │
//! │       ▲                │                        │                       │
//! │       │                └─ staged input resets   ├─ accepted ──► clear   │
//! │       │                   after every add       │              whole    │
//! │       │                                         │              session  │
//! │       └─────────────────────────────────────────┴─ rejected ──► cart    │
//! │                                                    kept intact          │
//! │                                                                         │
//! │  The `submitting` flag is the duplicate-submission guard: while it      │
//! │  is set, further submit attempts are refused without touching the      │
//! │  network.                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use kirana_core::Cart;

/// The line entry form as the operator fills it in, before the line is
/// committed to the cart.
#[derive(Debug, Clone, Default)]
pub struct StagedInput {
    /// Selected product code, if any.
    pub selected_code: Option<String>,

    /// Quantity to add. Staged as entered; validated by the engine.
    pub qty: i64,

    /// Percentage discount for this line.
    pub discount_percent: f64,

    /// Manual rate override. `None` or non-positive means "use the
    /// catalog sell price".
    pub rate: Option<f64>,
}

impl StagedInput {
    /// A fresh form: no product selected, quantity 1, no discount, no
    /// rate override.
    pub fn fresh() -> Self {
        StagedInput {
            selected_code: None,
            qty: 1,
            discount_percent: 0.0,
            rate: None,
        }
    }
}

/// The in-progress bill session.
#[derive(Debug, Clone)]
pub struct Session {
    cart: Cart,
    staged: StagedInput,
    customer_name: String,
    phone_number: String,
    submitting: bool,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Session {
            cart: Cart::new(),
            staged: StagedInput::fresh(),
            customer_name: String::new(),
            phone_number: String::new(),
            submitting: false,
        }
    }

    /// Returns the current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Replaces the cart with a new value.
    ///
    /// The cart type is an immutable value object; every engine
    /// operation yields a new cart which is swapped in here.
    pub fn set_cart(&mut self, cart: Cart) {
        self.cart = cart;
    }

    /// Returns the staged line input.
    pub fn staged(&self) -> &StagedInput {
        &self.staged
    }

    /// Mutable access to the staged line input.
    pub fn staged_mut(&mut self) -> &mut StagedInput {
        &mut self.staged
    }

    /// Resets the entry form after a line is committed.
    pub fn reset_staged(&mut self) {
        self.staged = StagedInput::fresh();
    }

    /// Returns the customer name as entered.
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Sets the customer name.
    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    /// Returns the customer phone number as entered.
    ///
    /// Display-only: printed on the bill, never sent to the collaborator.
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Sets the customer phone number.
    pub fn set_phone_number(&mut self, phone: impl Into<String>) {
        self.phone_number = phone.into();
    }

    /// True while a submission is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Attempts to take the submission guard.
    ///
    /// Returns `false` if a submission is already in flight, in which
    /// case the caller must refuse the new attempt.
    pub fn try_begin_submission(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    /// Releases the submission guard.
    ///
    /// Called on both acceptance and rejection; the guard covers only
    /// the window where a request is outstanding.
    pub fn end_submission(&mut self) {
        self.submitting = false;
    }

    /// Clears the bill after an accepted sale.
    ///
    /// Cart, staged input, and customer fields all reset; the guard is
    /// left alone because the caller releases it explicitly.
    pub fn clear_bill(&mut self) {
        self.cart = Cart::new();
        self.staged = StagedInput::fresh();
        self.customer_name.clear();
        self.phone_number.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared session state.
///
/// ## Thread Safety
/// `Arc<Mutex<Session>>`: the submission guard must be checked and set
/// atomically, so all session access goes through the one mutex.
#[derive(Debug, Clone)]
pub struct SessionState {
    inner: Arc<Mutex<Session>>,
}

impl SessionState {
    /// Creates state holding an empty session.
    pub fn new() -> Self {
        SessionState {
            inner: Arc::new(Mutex::new(Session::new())),
        }
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.inner.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.inner.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
