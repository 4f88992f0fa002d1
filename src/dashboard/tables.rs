//! The table of all transactions shown below the form.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_EDIT_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, format_currency,
    },
    transaction::Transaction,
};

/// Renders `transactions` in the order given, one row each.
///
/// Each row carries the transaction's fields and item endpoint as data
/// attributes for the form script.
pub(super) fn transactions_table(transactions: &[Transaction]) -> Markup {
    html! {
        section class="w-full overflow-x-auto mb-8"
        {
            table id="transactions-table" class="w-full text-sm text-left rtl:text-right"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        tr
                            class=(TABLE_ROW_STYLE)
                            data-id=(transaction.id)
                            data-amount=(transaction.amount)
                            data-date=(transaction.date)
                            data-description=(transaction.description)
                            data-endpoint=(format_endpoint(endpoints::TRANSACTION, transaction.id))
                        {
                            td class=(TABLE_CELL_STYLE) { (transaction.date) }
                            td class=(TABLE_CELL_STYLE) { (transaction.description) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(transaction.amount)) }
                            td class={ (TABLE_CELL_STYLE) " flex gap-4" }
                            {
                                button type="button" class={ "edit-transaction " (BUTTON_EDIT_STYLE) } { "Edit" }
                                button type="button" class={ "delete-transaction " (BUTTON_DELETE_STYLE) } { "Delete" }
                            }
                        }
                    }
                }
            }
        }
    }
}
