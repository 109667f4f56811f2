use chrono::{DateTime, NaiveDate, Utc};
use roost_catalog::{Listing, ListingType};
use roost_shared::Moment;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Fee and tax rules applied to every quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRules {
    /// Platform service fee, as a fraction of the discounted subtotal
    pub service_fee_rate: f64,
    pub tax_rate: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            service_fee_rate: 0.10,
            tax_rate: 0.0,
            currency: default_currency(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Discount {
    /// Fraction of the subtotal, e.g. 0.15
    Percent(f64),
    /// Absolute amount in the quote currency
    Fixed(f64),
}

/// A promotional code a guest can apply at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub code: String,
    pub discount: Discount,
    #[serde(default)]
    pub min_subtotal: f64,
    #[serde(default)]
    pub expires_at: Option<Moment>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Coupon {
    pub fn validate(&self, subtotal: f64, now: DateTime<Utc>) -> CoreResult<()> {
        if !self.active {
            return Err(CoreError::ValidationError(format!("Coupon {} is no longer active", self.code)));
        }

        if let Some(expires_at) = &self.expires_at {
            // An expiry we cannot read is treated as already passed.
            let expired = expires_at.to_datetime().map_or(true, |at| at < now);
            if expired {
                return Err(CoreError::ValidationError(format!("Coupon {} has expired", self.code)));
            }
        }

        if subtotal < self.min_subtotal {
            return Err(CoreError::ValidationError(format!(
                "Coupon {} requires a subtotal of at least {:.2}",
                self.code, self.min_subtotal
            )));
        }

        Ok(())
    }

    /// Discount amount for a subtotal, never more than the subtotal itself
    pub fn discount_for(&self, subtotal: f64) -> f64 {
        let amount = match self.discount {
            Discount::Percent(rate) => subtotal * rate.clamp(0.0, 1.0),
            Discount::Fixed(amount) => amount.max(0.0),
        };
        amount.min(subtotal)
    }
}

/// Price breakdown for a prospective booking
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub listing_id: String,
    /// Nights for stays, guests for experiences, 1 for services
    pub units: u32,
    pub unit_price: f64,
    pub subtotal: f64,
    pub discount: f64,
    pub service_fee: f64,
    pub tax: f64,
    pub grand_total: f64,
    pub currency: String,
    pub coupon_code: Option<String>,
}

pub struct PricingEngine {
    rules: PricingRules,
}

impl PricingEngine {
    pub fn new(rules: PricingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    /// Billable units for a listing over the requested dates
    pub fn units(&self, listing: &Listing, check_in: NaiveDate, check_out: NaiveDate, guests: u32) -> CoreResult<u32> {
        if check_out < check_in {
            return Err(CoreError::ValidationError("Check-out is before check-in".to_string()));
        }

        match listing.listing_type {
            ListingType::Stays => {
                let nights = (check_out - check_in).num_days();
                if nights < 1 {
                    return Err(CoreError::ValidationError("A stay needs at least one night".to_string()));
                }
                u32::try_from(nights)
                    .map_err(|_| CoreError::ValidationError("Stay is too long".to_string()))
            }
            ListingType::Experiences => Ok(guests.max(1)),
            ListingType::Services => Ok(1),
        }
    }

    pub fn quote(
        &self,
        listing: &Listing,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
        coupon: Option<&Coupon>,
    ) -> CoreResult<Quote> {
        let units = self.units(listing, check_in, check_out, guests)?;
        let subtotal = round_cents(listing.price * units as f64);

        let discount = match coupon {
            Some(coupon) => {
                coupon.validate(subtotal, Utc::now())?;
                round_cents(coupon.discount_for(subtotal))
            }
            None => 0.0,
        };

        let taxable = (subtotal - discount).max(0.0);
        let service_fee = round_cents(taxable * self.rules.service_fee_rate);
        let tax = round_cents(taxable * self.rules.tax_rate);

        Ok(Quote {
            listing_id: listing.id.clone(),
            units,
            unit_price: listing.price,
            subtotal,
            discount,
            service_fee,
            tax,
            grand_total: round_cents(taxable + service_fee + tax),
            currency: self.rules.currency.clone(),
            coupon_code: coupon.map(|c| c.code.clone()),
        })
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
