//! Fail-soft rental data service.
//!
//! Every method logs persistence failures and degrades to an empty result
//! instead of returning an error. Inputs are validated before any write.
//! The only failure surfaced to callers is the one `init_db` reports when no
//! backend at all can be opened.

use tracing::{error, info, warn};
use validator::Validate;

use domain::models::{
    Account, Booking, Car, CarUpdate, Customer, Language, NewAccount, NewBooking, NewCar,
    NewCustomer, NewLanguage, NewPosMachine, NewRole, NewTransaction, NewTranslation, NewUser,
    NewVendor, PosMachine, Role, Transaction, Translation, Vendor, VendorDetails, VendorUpdate,
};
use persistence::repositories::{
    AccountRepository, BookingRepository, CarRepository, CustomerRepository, LanguageRepository,
    PosMachineRepository, RoleRepository, TransactionRepository, TranslationRepository,
    UserRepository, VendorRepository,
};
use persistence::{schema, ConnectionManager, Filters, PersistenceError, Scope};

/// The rental application's data access surface.
#[derive(Clone)]
pub struct RentalService {
    db: ConnectionManager,
    vendors: VendorRepository,
    cars: CarRepository,
    bookings: BookingRepository,
    roles: RoleRepository,
    users: UserRepository,
    customers: CustomerRepository,
    transactions: TransactionRepository,
    accounts: AccountRepository,
    pos_machines: PosMachineRepository,
    languages: LanguageRepository,
    translations: TranslationRepository,
}

impl RentalService {
    pub fn new(db: ConnectionManager) -> Self {
        Self {
            vendors: VendorRepository::new(db.clone()),
            cars: CarRepository::new(db.clone()),
            bookings: BookingRepository::new(db.clone()),
            roles: RoleRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            customers: CustomerRepository::new(db.clone()),
            transactions: TransactionRepository::new(db.clone()),
            accounts: AccountRepository::new(db.clone()),
            pos_machines: PosMachineRepository::new(db.clone()),
            languages: LanguageRepository::new(db.clone()),
            translations: TranslationRepository::new(db.clone()),
            db,
        }
    }

    pub fn db(&self) -> &ConnectionManager {
        &self.db
    }

    /// Connects and ensures the schema exists on the selected backend.
    ///
    /// Non-fatal failures are logged and swallowed. An error is returned only
    /// when not even the local fallback database can be opened.
    pub async fn init_db(&self) -> Result<(), PersistenceError> {
        match schema::setup_tables(&self.db).await {
            Ok(()) => {
                let backend = self.db.backend_kind().await;
                info!(?backend, "database initialized");
                Ok(())
            }
            Err(e) if e.is_fatal() => {
                error!(operation = "init_db", error = %e, "database operation failed");
                Err(e)
            }
            Err(e) => {
                absorb("init_db", Err::<(), _>(e));
                Ok(())
            }
        }
    }

    // Vendors

    pub async fn add_vendor(&self, vendor: NewVendor) {
        if !is_valid("add_vendor", &vendor) {
            return;
        }
        absorb("add_vendor", self.vendors.create(vendor).await.map(drop));
    }

    pub async fn add_vendor_detailed(&self, details: VendorDetails) {
        if !is_valid("add_vendor_detailed", &details) {
            return;
        }
        absorb(
            "add_vendor_detailed",
            self.vendors.create_detailed(details).await.map(drop),
        );
    }

    pub async fn get_vendors(&self, filters: &Filters) -> Vec<Vendor> {
        absorb("get_vendors", self.vendors.list(filters).await)
    }

    pub async fn update_vendor(&self, id: i64, update: VendorUpdate) {
        if !is_valid("update_vendor", &update) {
            return;
        }
        absorb("update_vendor", self.vendors.update(id, update).await.map(drop));
    }

    pub async fn remove_vendor(&self, id: i64) {
        absorb("remove_vendor", self.vendors.delete(id).await.map(drop));
    }

    // Fleet

    pub async fn add_car(&self, car: NewCar) {
        if !is_valid("add_car", &car) {
            return;
        }
        absorb("add_car", self.cars.create(car).await.map(drop));
    }

    pub async fn get_cars(&self, vendor: Scope<i64>, filters: &Filters) -> Vec<Car> {
        absorb("get_cars", self.cars.list(vendor, filters).await)
    }

    pub async fn update_car(&self, id: i64, car: CarUpdate) {
        if !is_valid("update_car", &car) {
            return;
        }
        absorb("update_car", self.cars.update(id, car).await.map(drop));
    }

    pub async fn remove_car(&self, id: i64) {
        absorb("remove_car", self.cars.delete(id).await.map(drop));
    }

    // Bookings

    pub async fn add_booking(&self, booking: NewBooking) {
        if !is_valid("add_booking", &booking) {
            return;
        }
        absorb("add_booking", self.bookings.create(booking).await.map(drop));
    }

    pub async fn get_bookings(
        &self,
        vendor: Scope<i64>,
        filters: &Filters,
        future_only: bool,
    ) -> Vec<Booking> {
        absorb(
            "get_bookings",
            self.bookings.list(vendor, filters, future_only).await,
        )
    }

    // Roles and permissions

    pub async fn add_role(&self, role: NewRole) {
        if !is_valid("add_role", &role) {
            return;
        }
        absorb("add_role", self.roles.create(role).await.map(drop));
    }

    pub async fn get_roles(&self, tenant: Scope<i64>, filters: &Filters) -> Vec<Role> {
        absorb("get_roles", self.roles.list(tenant, filters).await)
    }

    pub async fn add_user(&self, user: NewUser) {
        if !is_valid("add_user", &user) {
            return;
        }
        absorb("add_user", self.users.create(user).await.map(drop));
    }

    /// False on any failure, including an unknown user.
    pub async fn check_permission(&self, username: &str, permission: &str) -> bool {
        absorb(
            "check_permission",
            self.roles.check_permission(username, permission).await,
        )
    }

    // Customers

    pub async fn add_customer(&self, customer: NewCustomer) {
        if !is_valid("add_customer", &customer) {
            return;
        }
        absorb("add_customer", self.customers.create(customer).await.map(drop));
    }

    pub async fn get_customers(&self, vendor: Scope<i64>, filters: &Filters) -> Vec<Customer> {
        absorb("get_customers", self.customers.list(vendor, filters).await)
    }

    /// Sets or clears the blacklist flag of a customer.
    pub async fn blacklist_customer(&self, id: i64, blacklisted: bool) {
        absorb(
            "blacklist_customer",
            self.customers.set_blacklisted(id, blacklisted).await.map(drop),
        );
    }

    // Ledger

    pub async fn add_transaction(&self, transaction: NewTransaction) {
        if !is_valid("add_transaction", &transaction) {
            return;
        }
        absorb(
            "add_transaction",
            self.transactions.create(transaction).await.map(drop),
        );
    }

    pub async fn get_transactions(&self, tenant: Scope<i64>, filters: &Filters) -> Vec<Transaction> {
        absorb("get_transactions", self.transactions.list(tenant, filters).await)
    }

    pub async fn add_account(&self, account: NewAccount) {
        if !is_valid("add_account", &account) {
            return;
        }
        absorb("add_account", self.accounts.create(account).await.map(drop));
    }

    pub async fn get_accounts(&self, tenant: Scope<i64>, filters: &Filters) -> Vec<Account> {
        absorb("get_accounts", self.accounts.list(tenant, filters).await)
    }

    pub async fn add_pos_machine(&self, machine: NewPosMachine) {
        if !is_valid("add_pos_machine", &machine) {
            return;
        }
        absorb(
            "add_pos_machine",
            self.pos_machines.create(machine).await.map(drop),
        );
    }

    pub async fn get_pos_machines(&self, tenant: Scope<i64>, filters: &Filters) -> Vec<PosMachine> {
        absorb("get_pos_machines", self.pos_machines.list(tenant, filters).await)
    }

    // Localization

    pub async fn add_language(&self, code: &str, name: &str) {
        let language = NewLanguage::new(code, name);
        if !is_valid("add_language", &language) {
            return;
        }
        absorb("add_language", self.languages.create(language).await.map(drop));
    }

    /// Registered languages, or English alone if none can be read.
    pub async fn get_languages(&self) -> Vec<Language> {
        let languages = absorb("get_languages", self.languages.list().await);
        if languages.is_empty() {
            vec![Language::default_locale()]
        } else {
            languages
        }
    }

    pub async fn add_translation(&self, lang_code: &str, key: &str, value: &str) {
        let translation = NewTranslation::new(lang_code, key, value);
        if !is_valid("add_translation", &translation) {
            return;
        }
        absorb(
            "add_translation",
            self.translations.create(translation).await.map(drop),
        );
    }

    pub async fn get_translations(&self, lang_code: &str) -> Vec<Translation> {
        absorb("get_translations", self.translations.list(lang_code).await)
    }
}

/// Logs a failed operation and substitutes the empty result.
fn absorb<T: Default>(operation: &'static str, result: Result<T, PersistenceError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!(operation, error = %e, fatal = e.is_fatal(), "database operation failed");
            T::default()
        }
    }
}

fn is_valid<T: Validate>(operation: &'static str, input: &T) -> bool {
    match input.validate() {
        Ok(()) => true,
        Err(errors) => {
            warn!(operation, %errors, "rejected invalid input");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_passes_values_through() {
        assert_eq!(absorb("get_vendors", Ok(vec![1, 2])), vec![1, 2]);
    }

    #[test]
    fn test_absorb_substitutes_default() {
        let result: Result<Vec<Vendor>, _> = Err(PersistenceError::Unavailable);
        assert!(absorb("get_vendors", result).is_empty());
        assert!(!absorb("check_permission", Err(PersistenceError::Unavailable)));
    }
}
