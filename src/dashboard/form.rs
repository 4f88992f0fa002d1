//! The add/edit transaction form.
//!
//! The form submits JSON to the transaction endpoints. In add mode it POSTs
//! the whole form to the collection endpoint. Clicking "Edit" on a table row
//! switches it to edit mode, where only the changed fields are PUT to the
//! item endpoint. The page reloads after a successful request so the table
//! and chart show the change.

use maud::{Markup, PreEscaped, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, HeadElement,
    },
};

pub(super) const FORM_ID: &str = "transaction-form";

pub(super) fn transaction_form() -> Markup {
    html! {
        form
            id=(FORM_ID)
            data-create-endpoint=(endpoints::TRANSACTIONS)
            class="w-full max-w-md space-y-4 mb-8"
        {
            h2 id="form-title" class="text-xl font-bold" { "Add Transaction" }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    type="number"
                    step="0.01"
                    name="amount"
                    id="amount"
                    placeholder="Amount"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;

                p id="amount-error" class=(FORM_ERROR_STYLE) { "Amount is required" }
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    type="date"
                    name="date"
                    id="date"
                    placeholder="Date"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;

                p id="date-error" class=(FORM_ERROR_STYLE) { "Date is required" }
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    type="text"
                    name="description"
                    id="description"
                    placeholder="Description"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;

                p id="description-error" class=(FORM_ERROR_STYLE) { "Description is required" }
            }

            button id="submit-button" type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add" }

            button
                id="cancel-edit-button"
                type="button"
                class={ "hidden " (BUTTON_SECONDARY_STYLE) }
            {
                "Cancel"
            }
        }
    }
}

pub(super) fn transaction_form_script() -> HeadElement {
    HeadElement::ScriptSource(PreEscaped(FORM_SCRIPT.to_owned()))
}

const FORM_SCRIPT: &str = r#"
const NOTICE_KEY = 'transaction-form-notice';

document.addEventListener('DOMContentLoaded', function() {
    const form = document.getElementById('transaction-form');
    const fields = ['amount', 'date', 'description'];
    const alertContainer = document.getElementById('alert-container');
    let editing = null;

    const showAlert = (message, success = false) => {
        alertContainer.textContent = message;
        alertContainer.classList.toggle('bg-red-100', !success);
        alertContainer.classList.toggle('text-red-800', !success);
        alertContainer.classList.toggle('bg-green-100', success);
        alertContainer.classList.toggle('text-green-800', success);
        alertContainer.classList.remove('hidden');
    };

    // Notices that should be shown after the page reloads.
    const notice = sessionStorage.getItem(NOTICE_KEY);
    if (notice) {
        sessionStorage.removeItem(NOTICE_KEY);
        showAlert(notice, true);
        setTimeout(() => alertContainer.classList.add('hidden'), 3000);
    }

    const readForm = () => ({
        amount: form.elements.amount.valueAsNumber,
        date: form.elements.date.value,
        description: form.elements.description.value.trim(),
    });

    const validate = (data) => {
        let valid = true;
        for (const field of fields) {
            const value = data[field];
            const missing = value === '' || (typeof value === 'number' && Number.isNaN(value));
            document.getElementById(field + '-error').classList.toggle('hidden', !missing);
            valid = valid && !missing;
        }
        return valid;
    };

    const setEditing = (row) => {
        editing = row ? { ...row.dataset, amount: Number(row.dataset.amount) } : null;
        form.reset();
        if (editing) {
            form.elements.amount.value = editing.amount;
            form.elements.date.value = editing.date;
            form.elements.description.value = editing.description;
        }
        document.getElementById('form-title').textContent = editing ? 'Edit Transaction' : 'Add Transaction';
        document.getElementById('submit-button').textContent = editing ? 'Update' : 'Add';
        document.getElementById('cancel-edit-button').classList.toggle('hidden', !editing);
    };

    const send = async (method, url, body) => {
        const response = await fetch(url, {
            method,
            headers: { 'Content-Type': 'application/json' },
            body: body === undefined ? undefined : JSON.stringify(body),
        });
        if (!response.ok) {
            const error = await response.json().catch(() => ({ message: 'Request failed' }));
            throw new Error(error.message);
        }
        return response.json();
    };

    form.addEventListener('submit', async (event) => {
        event.preventDefault();
        const data = readForm();
        if (!validate(data)) return;

        try {
            if (editing) {
                const changes = {};
                for (const field of fields) {
                    if (data[field] !== editing[field]) changes[field] = data[field];
                }
                await send('PUT', editing.endpoint, changes);
                sessionStorage.setItem(NOTICE_KEY, 'Transaction updated!');
            } else {
                await send('POST', form.dataset.createEndpoint, data);
            }
            window.location.reload();
        } catch (error) {
            showAlert(editing ? 'Update failed! ' + error.message : error.message);
        }
    });

    document.getElementById('cancel-edit-button').addEventListener('click', () => setEditing(null));

    document.querySelectorAll('.edit-transaction').forEach((button) => {
        button.addEventListener('click', () => setEditing(button.closest('tr')));
    });

    document.querySelectorAll('.delete-transaction').forEach((button) => {
        button.addEventListener('click', async () => {
            const row = button.closest('tr');
            if (!window.confirm('Delete "' + row.dataset.description + '"?')) return;
            try {
                await send('DELETE', row.dataset.endpoint);
                window.location.reload();
            } catch (error) {
                showAlert(error.message);
            }
        });
    });
});
"#;
