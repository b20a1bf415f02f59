//! Customer directory screen

use super::{Notice, report};
use crate::cache::{QueryCache, QueryKey};
use crate::{ClientResult, HttpClient, TrackerClient};
use shared::models::{Customer, CustomerId, CustomerPayload};
use shared::validation::validate_customer;

/// Create/edit form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerForm {
    Create,
    Edit(Customer),
}

pub struct CustomersView<C> {
    client: TrackerClient<C>,
    cache: QueryCache,
    customers: Vec<Customer>,
    form: Option<CustomerForm>,
    notice: Option<Notice>,
}

impl<C: HttpClient + 'static> CustomersView<C> {
    pub fn new(client: TrackerClient<C>, cache: QueryCache) -> Self {
        Self {
            client,
            cache,
            customers: Vec::new(),
            form: None,
            notice: None,
        }
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn form(&self) -> Option<&CustomerForm> {
        self.form.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Load the list through the cache
    pub async fn refresh(&mut self) -> ClientResult<&[Customer]> {
        let client = self.client.clone();
        let result = self
            .cache
            .fetch(&QueryKey::customers(), move || async move {
                client.customers().list().await
            })
            .await;
        match result {
            Ok(customers) => self.customers = customers,
            Err(err) => {
                self.notice = Some(Notice::from_error(&err, "Failed to load customers"));
                return Err(err);
            }
        }
        Ok(&self.customers)
    }

    pub fn open_create(&mut self) {
        self.form = Some(CustomerForm::Create);
    }

    pub fn open_edit(&mut self, customer: Customer) {
        self.form = Some(CustomerForm::Edit(customer));
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Submit the open form
    ///
    /// The form stays open when validation or the request fails.
    pub async fn submit(&mut self, payload: CustomerPayload) -> ClientResult<Customer> {
        let result = self.save(&payload).await;
        let editing = matches!(self.form, Some(CustomerForm::Edit(_)));
        let (success, failure) = if editing {
            ("Customer updated!", "Failed to update customer")
        } else {
            ("Customer created!", "Failed to create customer")
        };
        let customer = report(&mut self.notice, result, success, failure)?;
        self.form = None;
        self.cache.invalidate(&QueryKey::customers());
        Ok(customer)
    }

    async fn save(&self, payload: &CustomerPayload) -> ClientResult<Customer> {
        validate_customer(payload)?;
        match &self.form {
            Some(CustomerForm::Edit(customer)) => {
                self.client.customers().update(customer.id, payload).await
            }
            _ => self.client.customers().create(payload).await,
        }
    }

    pub async fn delete(&mut self, id: CustomerId) -> ClientResult<()> {
        let result = self.client.customers().remove(id).await;
        report(&mut self.notice, result, "Customer deleted!", "Failed to delete customer")?;
        self.cache.invalidate(&QueryKey::customers());
        self.cache.remove(&QueryKey::customer_orders(id));
        Ok(())
    }

    pub async fn find_by_name(&self, name: &str) -> ClientResult<Customer> {
        self.client.customers().get_by_name(name).await
    }

    pub async fn find_by_phone(&self, phone: &str) -> ClientResult<Customer> {
        self.client.customers().get_by_phone(phone).await
    }
}
