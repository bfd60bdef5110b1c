//! Filter controls: platform, sentiment, search text and connection threshold.

use leptos::prelude::*;

use crate::dataset::Sentiment;
use crate::filter::{FilterPredicate, PlatformChoice, SentimentChoice};

/// Form controls bound to the shared predicate signal.
///
/// Every control writes straight into `predicate`; the controls read their
/// displayed value back from it so a reset is reflected immediately.
#[component]
pub fn FilterPanel(
	/// Shared filter state, read and written by every control.
	predicate: RwSignal<FilterPredicate>,
	/// Choices for the platform select, after "All platforms".
	platforms: Vec<String>,
	/// Upper end of the min-connections slider.
	slider_max: u32,
	/// Invoked by the reset button.
	on_reset: Callback<()>,
) -> impl IntoView {
	let platform_options = platforms
		.into_iter()
		.map(|p| view! { <option value=p.clone()>{p.clone()}</option> })
		.collect_view();

	let sentiment_options = Sentiment::ALL
		.into_iter()
		.map(|s| view! { <option value=s.as_str()>{s.title()}</option> })
		.collect_view();

	view! {
		<section class="panel filters">
			<h2>"Filters"</h2>

			<label for="platform-filter">"Platform"</label>
			<select
				id="platform-filter"
				prop:value=move || predicate.with(|p| p.platform.as_value().to_string())
				on:change=move |ev| {
					let value = event_target_value(&ev);
					predicate.update(|p| p.platform = PlatformChoice::from_value(&value));
				}
			>
				<option value=PlatformChoice::ALL_VALUE>"All platforms"</option>
				{platform_options}
			</select>

			<label for="sentiment-filter">"Comment sentiment"</label>
			<select
				id="sentiment-filter"
				prop:value=move || predicate.with(|p| p.sentiment.as_value())
				on:change=move |ev| {
					let value = event_target_value(&ev);
					predicate.update(|p| p.sentiment = SentimentChoice::from_value(&value));
				}
			>
				<option value="all">"All sentiments"</option>
				{sentiment_options}
			</select>

			<label for="search-node">"Search"</label>
			<input
				id="search-node"
				type="text"
				placeholder="Search nodes..."
				prop:value=move || predicate.with(|p| p.search_text.clone())
				on:input=move |ev| {
					let value = event_target_value(&ev);
					predicate.update(|p| p.search_text = value);
				}
			/>

			<label for="min-connections">
				"Min connections: "
				<span id="min-connections-value">
					{move || predicate.with(|p| p.min_connections)}
				</span>
			</label>
			<input
				id="min-connections"
				type="range"
				min="1"
				max=slider_max.to_string()
				prop:value=move || predicate.with(|p| p.min_connections.to_string())
				on:input=move |ev| {
					let value = FilterPredicate::parse_min_connections(&event_target_value(&ev));
					predicate.update(|p| p.min_connections = value);
				}
			/>

			<button id="reset-filters" on:click=move |_| on_reset.run(())>
				"Reset filters"
			</button>
		</section>
	}
}
