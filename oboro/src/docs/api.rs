/*!
# Oboro API documentation

This page describes the API endpoints available on Oboro. Every endpoint
accepts and returns JSON, and successful responses are lists.

## Question

Endpoint: `POST /api/v1/question`

Starts a session. The phrase the user searched for is split into words, the
words are looked up in the vocabulary, and a question about one of the
resources they lead to is returned.

### Body

- `userID` - A hyphenated UUID identifying the user. The user is remembered
  from the first request on.
- `value` - The phrase the user searched for. Words are separated by spaces,
  ideographic spaces, or tabs.
- `lang` - `ja` or `en`. Questions tagged with the other language are never
  offered.

### Response

A list holding one object with the following keys:

- `version` - The API version, currently `v0.0.1`.
- `questionID` - A 24 character hexadecimal identifier of the question.
- `questionNumber` - The position of the question in the session. The first
  question is `1`.
- `questionJA`, `questionEN` - The question in Japanese and in English.
- `url` - The resource the question is about.
- `title`, `description` - What is known about `url`. Empty if nothing is.

## Question answer

Endpoint: `POST /api/v1/question-answer`

Records an answer to a question, and returns the next question in the same
shape as above, with `questionNumber` one higher than the answered question.

### Body

- `questionID` - The question that was answered.
- `userID` - The user answering.
- `questionNumber` - The position of the answered question, 1 or more.
- `questionAnswerID` - The chosen answer, from 1 to 5.
- `questionValue` - The phrase to base the next question on.
- `lang` - `ja` or `en`.

## User reports

Endpoints: `POST /api/v1/user/query` and `POST /api/v1/user/favorite`

Report a search (`{"href", "searchValue", "isChecked"}`) or mark a resource
as a favorite (`{"href", "isChecked"}`). Both respond with
`[{"version": "v0.0.1"}]`.

### Response Status Codes

- 200 OK - The request was handled normally.
- 400 Bad Request - A field is missing or invalid. The body is
  `[{"message": "..."}]` naming the field.
- 405 Method Not Allowed - Only `POST` is supported.
- 422 Unprocessable Entity - No question could be found for the phrase. The
  body carries a `kind` of `no-match`, `empty-keyword-pool`, or
  `no-question-match`.
- 503 Service Unavailable - A store did not respond in time. The body carries
  a `kind` of `store-unavailable`. Try again later.
*/
