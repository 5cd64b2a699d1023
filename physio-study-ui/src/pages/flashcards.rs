//! Flashcards Page
//!
//! Muscle cards by body region, flipped in flashcard mode or self-graded in
//! quiz mode.

use gloo_timers::callback::Timeout;
use leptos::*;
use physio_study::catalog::{CategoryFilter, MuscleRecord};
use physio_study::flashcards::{FlashcardState, StudyMode, DEFAULT_ADVANCE_DELAY};

/// Flashcards page component
#[component]
pub fn Flashcards() -> impl IntoView {
    let deck = create_rw_signal(FlashcardState::new());
    let advance = store_value(None::<Timeout>);

    on_cleanup(move || {
        // Dropping a gloo Timeout cancels it
        advance.set_value(None);
        let _ = deck.try_update(|s| s.cancel_advance());
    });

    let grade = Callback::new(move |is_correct: bool| {
        let mut ticket = None;
        deck.update(|s| ticket = s.grade(is_correct));
        if let Some(ticket) = ticket {
            let delay = DEFAULT_ADVANCE_DELAY.as_millis() as u32;
            let timer = Timeout::new(delay, move || {
                deck.update(|s| {
                    s.complete_advance(ticket);
                });
            });
            advance.set_value(Some(timer));
        }
    });

    view! {
        <div class="space-y-6 max-w-3xl mx-auto">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Muscle flashcards"</h1>
                <p class="text-gray-400 mt-1">"Learn each muscle with its origin, insertion and function"</p>
            </div>

            <ControlBar deck=deck />
            <ProgressBar deck=deck />

            {move || {
                let Some(record) = deck.with(|s| s.current()) else {
                    return view! {
                        <div class="bg-gray-800 rounded-xl p-12 text-center text-gray-400">
                            "No muscles in this category"
                        </div>
                    }
                    .into_view();
                };
                view! { <Card deck=deck record=record grade=grade /> }.into_view()
            }}

            <Navigation deck=deck />
            <StudyTips />
        </div>
    }
}

/// Mode toggle, category selector and score
#[component]
fn ControlBar(deck: RwSignal<FlashcardState>) -> impl IntoView {
    let quiz = move || deck.with(|s| s.mode() == StudyMode::Quiz);

    view! {
        <div class="bg-gray-800 rounded-xl p-4 flex flex-wrap items-center gap-4">
            <div class="flex rounded-lg overflow-hidden border border-gray-600">
                <button
                    on:click=move |_| deck.update(|s| s.set_mode(StudyMode::Flashcard))
                    class=move || mode_class(!quiz())
                >
                    "🃏 Flashcards"
                </button>
                <button
                    on:click=move |_| deck.update(|s| s.set_mode(StudyMode::Quiz))
                    class=move || mode_class(quiz())
                >
                    "❓ Quiz"
                </button>
            </div>

            <select
                on:change=move |ev| {
                    if let Ok(filter) = event_target_value(&ev).parse::<CategoryFilter>() {
                        deck.update(|s| s.select_category(filter));
                    }
                }
                class="bg-gray-700 rounded-lg px-3 py-2 border border-gray-600 focus:outline-none"
            >
                {CategoryFilter::OPTIONS
                    .into_iter()
                    .map(|filter| view! {
                        <option
                            value=filter.as_str()
                            selected=move || deck.with(|s| s.filter() == filter)
                        >
                            {format!("{} {}", filter.icon(), filter.label())}
                        </option>
                    })
                    .collect_view()}
            </select>

            {move || quiz().then(|| view! {
                <div class="ml-auto flex items-center space-x-3">
                    <span class="text-gray-300">
                        "Score: "
                        <span class="font-semibold text-white">{move || deck.with(|s| s.score().to_string())}</span>
                    </span>
                    <button
                        on:click=move |_| deck.update(|s| s.reset_score())
                        class="px-3 py-1 text-sm bg-gray-700 hover:bg-gray-600 rounded-lg transition-colors"
                    >
                        "Reset"
                    </button>
                </div>
            })}
        </div>
    }
}

fn mode_class(active: bool) -> &'static str {
    if active {
        "px-4 py-2 bg-primary-600 text-white"
    } else {
        "px-4 py-2 bg-gray-700 text-gray-300 hover:bg-gray-600"
    }
}

#[component]
fn ProgressBar(deck: RwSignal<FlashcardState>) -> impl IntoView {
    let progress = move || deck.with(|s| s.progress());

    view! {
        <div>
            <div class="flex justify-between text-sm text-gray-400 mb-1">
                <span>{move || format!("Card {} of {}", progress().position, progress().total)}</span>
                <span>{move || format!("{:.0}%", progress().fraction() * 100.0)}</span>
            </div>
            <div class="h-2 bg-gray-700 rounded-full overflow-hidden">
                <div
                    class="h-full bg-primary-500 transition-all duration-300"
                    style=move || format!("width: {:.1}%", progress().fraction() * 100.0)
                />
            </div>
        </div>
    }
}

/// The current card, both faces
#[component]
fn Card(deck: RwSignal<FlashcardState>, record: &'static MuscleRecord, grade: Callback<bool>) -> impl IntoView {
    let quiz = move || deck.with(|s| s.mode() == StudyMode::Quiz);
    let answer_visible = move || deck.with(|s| s.is_flipped() || s.show_answer());
    let pending = move || deck.with(|s| s.pending_advance().is_some());

    view! {
        <div
            on:click=move |_| deck.update(|s| {
                s.flip();
            })
            class=move || format!(
                "bg-gray-800 rounded-xl p-6 border border-gray-700 min-h-[22rem] {}",
                if quiz() { "" } else { "cursor-pointer hover:border-primary-500 transition-colors" }
            )
        >
            {move || if answer_visible() && !quiz() {
                view! { <Answer record=record /> }.into_view()
            } else {
                view! {
                    <div class="text-center space-y-4">
                        <img
                            src=record.image_url
                            alt="Muscle illustration"
                            class="mx-auto max-h-64 rounded-lg bg-gray-900 object-contain"
                        />
                        <p class="text-xl font-semibold">"Which muscle is this?"</p>
                        {move || (!quiz()).then(|| view! {
                            <p class="text-sm text-gray-400">"Click the card to see the answer"</p>
                        })}
                    </div>
                }
                .into_view()
            }}

            {move || quiz().then(|| {
                if deck.with(|s| s.show_answer()) {
                    view! {
                        <div class="mt-6 pt-6 border-t border-gray-700">
                            <Answer record=record />
                            <div class="mt-6 flex justify-center space-x-4">
                                <button
                                    on:click=move |_| grade.call(true)
                                    disabled=pending
                                    class="px-6 py-2 bg-green-600 hover:bg-green-700 disabled:opacity-50
                                           rounded-lg font-medium transition-colors"
                                >
                                    "✓ I knew it"
                                </button>
                                <button
                                    on:click=move |_| grade.call(false)
                                    disabled=pending
                                    class="px-6 py-2 bg-red-600 hover:bg-red-700 disabled:opacity-50
                                           rounded-lg font-medium transition-colors"
                                >
                                    "✗ Not yet"
                                </button>
                            </div>
                        </div>
                    }
                    .into_view()
                } else {
                    view! {
                        <div class="mt-6 text-center">
                            <button
                                on:click=move |_| deck.update(|s| {
                                    s.reveal();
                                })
                                class="px-6 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                            >
                                "Show answer"
                            </button>
                        </div>
                    }
                    .into_view()
                }
            })}
        </div>
    }
}

#[component]
fn Answer(record: &'static MuscleRecord) -> impl IntoView {
    view! {
        <div class="space-y-3">
            <div class="flex items-center space-x-2">
                <span class="text-2xl">{record.category.icon()}</span>
                <h2 class="text-2xl font-bold">{record.name}</h2>
            </div>
            <p class="text-gray-300">{record.description}</p>
            <AnswerRow label="Origin" value=record.origin />
            <AnswerRow label="Insertion" value=record.insertion />
            <AnswerRow label="Function" value=record.function />
        </div>
    }
}

#[component]
fn AnswerRow(label: &'static str, value: &'static str) -> impl IntoView {
    view! {
        <div class="bg-gray-700/50 rounded-lg px-4 py-2">
            <span class="text-sm text-gray-400">{label}": "</span>
            <span>{value}</span>
        </div>
    }
}

/// Previous/next buttons and one dot per card
#[component]
fn Navigation(deck: RwSignal<FlashcardState>) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between">
            <button
                on:click=move |_| deck.update(|s| s.previous())
                class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg transition-colors"
            >
                "← Previous"
            </button>

            <div class="flex flex-wrap justify-center gap-1 px-4">
                {move || {
                    let (len, current) = deck.with(|s| (s.len(), s.current_index()));
                    (0..len)
                        .map(|index| view! {
                            <button
                                on:click=move |_| deck.update(|s| {
                                    s.jump_to(index);
                                })
                                class=if index == current {
                                    "w-3 h-3 rounded-full bg-primary-500"
                                } else {
                                    "w-3 h-3 rounded-full bg-gray-600 hover:bg-gray-500"
                                }
                                title=format!("Card {}", index + 1)
                            />
                        })
                        .collect_view()
                }}
            </div>

            <button
                on:click=move |_| deck.update(|s| s.next())
                class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg transition-colors"
            >
                "Next →"
            </button>
        </div>
    }
}

#[component]
fn StudyTips() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-lg font-semibold mb-3">"💡 Study tips"</h2>
            <ul class="list-disc list-inside space-y-1 text-gray-300 text-sm">
                <li>"Say the origin and insertion out loud before you flip the card"</li>
                <li>"Use quiz mode to find the muscles you still mix up"</li>
                <li>"Study one body region at a time, then mix them with \"All muscles\""</li>
                <li>"Feel the muscle contract on yourself while you read its function"</li>
            </ul>
        </section>
    }
}
