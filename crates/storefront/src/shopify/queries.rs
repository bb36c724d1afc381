//! GraphQL documents for the Shopify Storefront API.
//!
//! Hand-written documents sent as plain strings; response shapes live in
//! [`super::types`]. Catalog documents share the `productFields` fragment so
//! every path through the API yields the same product selection.

/// Product selection shared by the catalog queries.
const PRODUCT_FRAGMENT: &str = r"
    fragment productFields on Product {
        id
        handle
        title
        description
        descriptionHtml
        tags
        productType
        availableForSale
        featuredImage {
            url
            altText
        }
        images(first: 10) {
            edges {
                node {
                    url
                    altText
                }
            }
        }
        priceRange {
            minVariantPrice {
                amount
                currencyCode
            }
        }
        compareAtPriceRange {
            minVariantPrice {
                amount
                currencyCode
            }
        }
        variants(first: 100) {
            edges {
                node {
                    id
                    title
                    availableForSale
                    selectedOptions {
                        name
                        value
                    }
                    price {
                        amount
                        currencyCode
                    }
                    compareAtPrice {
                        amount
                        currencyCode
                    }
                    image {
                        url
                    }
                }
            }
        }
    }
";

/// Build a complete document from the product fragment and a query body.
fn with_product_fragment(body: &str) -> String {
    format!("{PRODUCT_FRAGMENT}\n{body}")
}

// =============================================================================
// Catalog
// =============================================================================

/// Paginated product listing with sort key and direction.
#[must_use]
pub fn get_products() -> String {
    with_product_fragment(
        r"
        query GetProducts($first: Int!, $sortKey: ProductSortKeys!, $reverse: Boolean!) {
            products(first: $first, sortKey: $sortKey, reverse: $reverse) {
                edges {
                    node {
                        ...productFields
                    }
                }
            }
        }
    ",
    )
}

/// Single collection with its nested product listing.
#[must_use]
pub fn get_collection_products() -> String {
    with_product_fragment(
        r"
        query GetCollectionProducts($handle: String!, $first: Int!, $sortKey: ProductCollectionSortKeys!, $reverse: Boolean!) {
            collection(handle: $handle) {
                id
                handle
                title
                description
                image {
                    url
                }
                products(first: $first, sortKey: $sortKey, reverse: $reverse) {
                    edges {
                        node {
                            ...productFields
                        }
                    }
                }
            }
        }
    ",
    )
}

/// Single product by URL slug.
#[must_use]
pub fn get_product_by_handle() -> String {
    with_product_fragment(
        r"
        query GetProductByHandle($handle: String!) {
            product(handle: $handle) {
                ...productFields
            }
        }
    ",
    )
}

/// Batch product lookup by gateway ID (wishlist resolution).
#[must_use]
pub fn get_products_by_ids() -> String {
    with_product_fragment(
        r"
        query GetProductsByIds($ids: [ID!]!) {
            nodes(ids: $ids) {
                ... on Product {
                    ...productFields
                }
            }
        }
    ",
    )
}

/// Full-text product search.
#[must_use]
pub fn search_products() -> String {
    with_product_fragment(
        r"
        query SearchProducts($query: String!, $first: Int!) {
            search(query: $query, first: $first, types: PRODUCT) {
                edges {
                    node {
                        ... on Product {
                            ...productFields
                        }
                    }
                }
            }
        }
    ",
    )
}

/// Collection listing, metadata only.
pub const GET_COLLECTIONS: &str = r"
    query GetCollections($first: Int!) {
        collections(first: $first) {
            edges {
                node {
                    id
                    handle
                    title
                    description
                    image {
                        url
                    }
                }
            }
        }
    }
";

// =============================================================================
// Customer account
// =============================================================================

pub const CUSTOMER_ACCESS_TOKEN_CREATE: &str = r"
    mutation CustomerAccessTokenCreate($input: CustomerAccessTokenCreateInput!) {
        customerAccessTokenCreate(input: $input) {
            customerAccessToken {
                accessToken
                expiresAt
            }
            customerUserErrors {
                message
            }
        }
    }
";

pub const CUSTOMER_CREATE: &str = r"
    mutation CustomerCreate($input: CustomerCreateInput!) {
        customerCreate(input: $input) {
            customer {
                id
                email
                firstName
                lastName
            }
            customerUserErrors {
                message
            }
        }
    }
";

pub const CUSTOMER_ACCESS_TOKEN_DELETE: &str = r"
    mutation CustomerAccessTokenDelete($customerAccessToken: String!) {
        customerAccessTokenDelete(customerAccessToken: $customerAccessToken) {
            deletedAccessToken
            userErrors {
                message
            }
        }
    }
";

pub const CUSTOMER_RECOVER: &str = r"
    mutation CustomerRecover($email: String!) {
        customerRecover(email: $email) {
            customerUserErrors {
                message
            }
        }
    }
";

pub const GET_CUSTOMER: &str = r"
    query GetCustomer($customerAccessToken: String!) {
        customer(customerAccessToken: $customerAccessToken) {
            id
            email
            firstName
            lastName
            phone
        }
    }
";

pub const GET_CUSTOMER_ORDERS: &str = r"
    query GetCustomerOrders($customerAccessToken: String!, $first: Int!) {
        customer(customerAccessToken: $customerAccessToken) {
            orders(first: $first, sortKey: PROCESSED_AT, reverse: true) {
                edges {
                    node {
                        id
                        name
                        orderNumber
                        processedAt
                        financialStatus
                        fulfillmentStatus
                        totalPrice {
                            amount
                            currencyCode
                        }
                        subtotalPrice {
                            amount
                            currencyCode
                        }
                        totalShippingPrice {
                            amount
                            currencyCode
                        }
                        shippingAddress {
                            address1
                            city
                            province
                            country
                            zip
                        }
                        lineItems(first: 10) {
                            edges {
                                node {
                                    title
                                    quantity
                                    originalTotalPrice {
                                        amount
                                        currencyCode
                                    }
                                    variant {
                                        title
                                        image {
                                            url
                                        }
                                        selectedOptions {
                                            name
                                            value
                                        }
                                        product {
                                            handle
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
";
