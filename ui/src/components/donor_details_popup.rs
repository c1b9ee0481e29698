use dashboard::{DonorLookup, Query};
use payloads::{AcceptedDonor, RequestStatus, responses::DonorDetails};
use std::rc::Rc;
use yew::prelude::*;

use super::Spinner;
use crate::get_api_client;
use crate::hooks::{use_query_client, use_query_snapshot};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub donor: AcceptedDonor,
    pub status: RequestStatus,
}

/// "Details" button that opens the accepted donor's contact information.
#[function_component]
pub fn DonorDetailsPopup(props: &Props) -> Html {
    let is_open = use_state(|| false);
    let client = use_query_client();

    let lookup = use_memo(
        (client, props.donor.clone(), props.status),
        |(client, donor, status)| {
            DonorLookup::new(client, Rc::new(get_api_client()), donor, *status)
        },
    );

    let on_toggle = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(!*is_open))
    };
    let on_close = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(false))
    };

    html! {
        <div class="relative">
            <button
                onclick={on_toggle}
                class="text-sm text-blue-600 dark:text-blue-400 hover:underline"
            >
                {"Details"}
            </button>
            if *is_open {
                <>
                <div onclick={on_close} class="fixed inset-0 z-40" />
                <div class="absolute left-0 mt-1 p-4 w-64 bg-white dark:bg-neutral-800 \
                            rounded-md shadow-lg border border-neutral-200 \
                            dark:border-neutral-700 z-50 text-sm">
                    {match (lookup.message(), lookup.query()) {
                        (Some(message), _) => html! {
                            <p class="text-neutral-600 dark:text-neutral-400">{message}</p>
                        },
                        (None, Some(query)) => html! {
                            <DonorDetailsCard query={query.clone()} />
                        },
                        (None, None) => html! {},
                    }}
                </div>
                </>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CardProps {
    query: Query<DonorDetails>,
}

/// Mounted only while the popup is open, so details are fetched on demand.
#[function_component]
fn DonorDetailsCard(props: &CardProps) -> Html {
    let snapshot = use_query_snapshot(props.query.clone());

    if snapshot.is_error() {
        return html! {
            <p class="text-red-600 dark:text-red-400">{"Could not load donor details."}</p>
        };
    }
    let Some(donor) = snapshot.data.as_ref() else {
        return html! { <Spinner /> };
    };

    let field = |label: &str, value: Option<String>| match value {
        Some(value) => html! {
            <div class="flex justify-between">
                <dt class="text-neutral-500">{label.to_string()}</dt>
                <dd class="font-medium">{value}</dd>
            </div>
        },
        None => html! {},
    };

    html! {
        <dl class="space-y-1">
            {field("Name", Some(donor.name.clone()))}
            {field("Phone", donor.phone.clone())}
            {field("Email", donor.email.clone())}
            {field("Blood Group", donor.blood_group.map(|g| g.to_string()))}
            {field("District", donor.district.clone())}
        </dl>
    }
}
