//! In-memory store used by the handler tests

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

use crate::models::{
    Address, Contact, ContactFilter, NewAddress, NewContact, NewUser, Pagination, User,
};
use crate::repositories::{AddressStore, ContactStore, UserStore};

/// Implements every store trait over vectors behind a single lock
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    contacts: Vec<Contact>,
    addresses: Vec<Address>,
    user_seq: i64,
    contact_seq: i64,
    address_seq: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of stored addresses, for cascade assertions
    pub fn address_count(&self) -> usize {
        self.lock().addresses.len()
    }
}

fn next(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, new_user: &NewUser) -> Result<Option<User>> {
        let mut inner = self.lock();
        if inner.users.iter().any(|u| u.username == new_user.username) {
            return Ok(None);
        }

        let now = Utc::now();
        let user = User {
            id: next(&mut inner.user_seq),
            username: new_user.username.clone(),
            password_hash: new_user.password_hash.clone(),
            name: new_user.name.clone(),
            token: None,
            created_at: now,
            updated_at: now,
        };
        inner.users.push(user.clone());
        Ok(Some(user))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.token.as_deref() == Some(token))
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<Option<User>> {
        let mut inner = self.lock();
        let Some(stored) = inner.users.iter_mut().find(|u| u.id == user.id) else {
            return Ok(None);
        };

        stored.name = user.name.clone();
        stored.password_hash = user.password_hash.clone();
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn set_token(&self, user_id: i64, token: Option<&str>) -> Result<()> {
        let mut inner = self.lock();
        if let Some(stored) = inner.users.iter_mut().find(|u| u.id == user_id) {
            stored.token = token.map(str::to_string);
            stored.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn create(&self, user_id: i64, new_contact: &NewContact) -> Result<Contact> {
        let mut inner = self.lock();
        if !inner.users.iter().any(|u| u.id == user_id) {
            bail!("insert or update on table \"contacts\" violates foreign key constraint");
        }

        let now = Utc::now();
        let contact = Contact {
            id: next(&mut inner.contact_seq),
            user_id,
            first_name: new_contact.first_name.clone(),
            last_name: new_contact.last_name.clone(),
            email: new_contact.email.clone(),
            phone: new_contact.phone.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn find_for_user(&self, user_id: i64, contact_id: i64) -> Result<Option<Contact>> {
        Ok(self
            .lock()
            .contacts
            .iter()
            .find(|c| c.id == contact_id && c.user_id == user_id)
            .cloned())
    }

    async fn update(&self, contact: &Contact) -> Result<Option<Contact>> {
        let mut inner = self.lock();
        let Some(stored) = inner
            .contacts
            .iter_mut()
            .find(|c| c.id == contact.id && c.user_id == contact.user_id)
        else {
            return Ok(None);
        };

        stored.first_name = contact.first_name.clone();
        stored.last_name = contact.last_name.clone();
        stored.email = contact.email.clone();
        stored.phone = contact.phone.clone();
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, contact: &Contact) -> Result<bool> {
        let mut inner = self.lock();
        let before = inner.contacts.len();
        inner
            .contacts
            .retain(|c| !(c.id == contact.id && c.user_id == contact.user_id));
        let deleted = inner.contacts.len() < before;

        if deleted {
            inner.addresses.retain(|a| a.contact_id != contact.id);
        }
        Ok(deleted)
    }

    async fn search(
        &self,
        user_id: i64,
        filter: &ContactFilter,
        page: Pagination,
    ) -> Result<(Vec<Contact>, i64)> {
        let inner = self.lock();
        let mut matches: Vec<&Contact> = inner
            .contacts
            .iter()
            .filter(|c| c.user_id == user_id && filter.matches(c))
            .collect();
        matches.sort_by_key(|c| c.id);

        let total = matches.len() as i64;
        let contacts = matches
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .cloned()
            .collect();

        Ok((contacts, total))
    }
}

#[async_trait]
impl AddressStore for MemoryStore {
    async fn create(&self, contact_id: i64, new_address: &NewAddress) -> Result<Address> {
        let mut inner = self.lock();
        if !inner.contacts.iter().any(|c| c.id == contact_id) {
            bail!("insert or update on table \"addresses\" violates foreign key constraint");
        }

        let now = Utc::now();
        let address = Address {
            id: next(&mut inner.address_seq),
            contact_id,
            street: Some(new_address.street.clone()),
            city: Some(new_address.city.clone()),
            province: Some(new_address.province.clone()),
            country: new_address.country.clone(),
            postal_code: Some(new_address.postal_code.clone()),
            created_at: now,
            updated_at: now,
        };
        inner.addresses.push(address.clone());
        Ok(address)
    }

    async fn find_for_contact(
        &self,
        contact_id: i64,
        address_id: i64,
    ) -> Result<Option<Address>> {
        Ok(self
            .lock()
            .addresses
            .iter()
            .find(|a| a.id == address_id && a.contact_id == contact_id)
            .cloned())
    }

    async fn list_for_contact(&self, contact_id: i64) -> Result<Vec<Address>> {
        let mut addresses: Vec<Address> = self
            .lock()
            .addresses
            .iter()
            .filter(|a| a.contact_id == contact_id)
            .cloned()
            .collect();
        addresses.sort_by_key(|a| a.id);
        Ok(addresses)
    }

    async fn update(&self, address: &Address) -> Result<Option<Address>> {
        let mut inner = self.lock();
        let Some(stored) = inner
            .addresses
            .iter_mut()
            .find(|a| a.id == address.id && a.contact_id == address.contact_id)
        else {
            return Ok(None);
        };

        stored.street = address.street.clone();
        stored.city = address.city.clone();
        stored.province = address.province.clone();
        stored.country = address.country.clone();
        stored.postal_code = address.postal_code.clone();
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, address: &Address) -> Result<bool> {
        let mut inner = self.lock();
        let before = inner.addresses.len();
        inner
            .addresses
            .retain(|a| !(a.id == address.id && a.contact_id == address.contact_id));
        Ok(inner.addresses.len() < before)
    }
}
