//! Dashboard single-page template.
//!
//! The page is a pure caller of the JSON API: metadata and summary
//! derivation happen server-side only.

/// アプリ全体を1ページで返す
pub fn render_app() -> String {
    APP_PAGE.to_string()
}

const APP_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>LinkSaver</title>
    <style>
        :root {
            --bg: #f6f8fa;
            --fg: #1f2328;
            --muted: #656d76;
            --border: #d0d7de;
            --accent: #0969da;
            --danger: #cf222e;
            --ok: #1a7f37;
            --warn: #9a6700;
        }
        * { box-sizing: border-box; }
        body {
            margin: 0;
            font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--fg);
        }
        .container { max-width: 720px; margin: 0 auto; padding: 24px 16px; }
        h1 { font-size: 22px; }
        input, button {
            font-size: 14px;
            padding: 8px 12px;
            border-radius: 6px;
            border: 1px solid var(--border);
        }
        input { width: 100%; margin-bottom: 8px; background: #fff; }
        button {
            background: var(--accent);
            color: #fff;
            border: none;
            cursor: pointer;
        }
        button.secondary { background: transparent; color: var(--accent); }
        button.danger { background: transparent; color: var(--danger); border: 1px solid var(--border); }
        .card {
            background: #fff;
            border: 1px solid var(--border);
            border-radius: 8px;
            padding: 16px;
            margin-bottom: 12px;
        }
        .auth-box { max-width: 360px; margin: 64px auto; }
        .error { color: var(--danger); font-size: 13px; min-height: 18px; }
        .row { display: flex; gap: 8px; align-items: center; }
        .row input { margin-bottom: 0; }
        .bookmark-title { font-weight: 600; text-decoration: none; color: var(--accent); }
        .bookmark-url { color: var(--muted); font-size: 12px; word-break: break-all; }
        .bookmark-summary { font-size: 14px; margin: 8px 0 0; }
        .favicon { width: 16px; height: 16px; vertical-align: text-bottom; margin-right: 6px; }
        .badge { font-size: 11px; border-radius: 10px; padding: 2px 8px; }
        .badge.processing { background: #fff8c5; color: var(--warn); }
        .badge.completed { background: #dafbe1; color: var(--ok); }
        .badge.failed { background: #ffebe9; color: var(--danger); }
        .muted { color: var(--muted); font-size: 13px; }
        .topbar { display: flex; justify-content: space-between; align-items: center; }
    </style>
</head>
<body>
<div id="app" class="container"></div>
<script>
const api = {
    token: localStorage.getItem('token') || null,

    async request(path, options = {}) {
        const headers = { 'Content-Type': 'application/json' };
        if (this.token) headers['Authorization'] = 'Bearer ' + this.token;
        const response = await fetch(path, { ...options, headers });
        if (response.status === 401) {
            setToken(null);
            render();
            throw new Error('Unauthorized');
        }
        return response.json();
    },

    register(email, password) {
        return this.request('/api/auth/register', {
            method: 'POST',
            body: JSON.stringify({ email, password }),
        });
    },
    login(email, password) {
        return this.request('/api/auth/login', {
            method: 'POST',
            body: JSON.stringify({ email, password }),
        });
    },
    listBookmarks() { return this.request('/api/bookmarks'); },
    addBookmark(url) {
        return this.request('/api/bookmarks', {
            method: 'POST',
            body: JSON.stringify({ url }),
        });
    },
    deleteBookmark(id) {
        return this.request('/api/bookmarks?id=' + encodeURIComponent(id), {
            method: 'DELETE',
        });
    },
};

let state = {
    mode: 'login',          // 'login' | 'register'
    bookmarks: [],
    searchTerm: '',
    authError: '',
    addError: '',
};
let pollTimer = null;

function setToken(token) {
    api.token = token;
    if (token) localStorage.setItem('token', token);
    else localStorage.removeItem('token');
}

function esc(s) {
    const div = document.createElement('div');
    div.textContent = s == null ? '' : String(s);
    return div.innerHTML;
}

async function refreshBookmarks() {
    try {
        state.bookmarks = await api.listBookmarks();
    } catch (e) {
        return;
    }
    render();
    // processing の行が残っている間は再取得でポーリングする
    clearTimeout(pollTimer);
    if (state.bookmarks.some(b => b.status === 'processing')) {
        pollTimer = setTimeout(refreshBookmarks, 3000);
    }
}

async function submitAuth(ev) {
    ev.preventDefault();
    const email = document.getElementById('email').value;
    const password = document.getElementById('password').value;
    const call = state.mode === 'login' ? api.login(email, password)
                                        : api.register(email, password);
    let data;
    try {
        data = await call;
    } catch (e) {
        state.authError = 'Network error';
        render();
        return;
    }
    if (data.token) {
        setToken(data.token);
        state.authError = '';
        state.searchTerm = '';
        render();
        refreshBookmarks();
    } else {
        state.authError = data.error || 'Request failed';
        render();
    }
}

async function addBookmark(ev) {
    ev.preventDefault();
    const input = document.getElementById('new-url');
    const url = input.value.trim();
    if (!url) return;
    let bookmark;
    try {
        bookmark = await api.addBookmark(url);
    } catch (e) {
        return;
    }
    if (bookmark.error) {
        state.addError = bookmark.error;
        render();
        return;
    }
    state.addError = '';
    state.bookmarks.unshift(bookmark);
    input.value = '';
    render();
    clearTimeout(pollTimer);
    pollTimer = setTimeout(refreshBookmarks, 3000);
}

async function removeBookmark(id) {
    let data;
    try {
        data = await api.deleteBookmark(id);
    } catch (e) {
        return;
    }
    // サーバー側で削除が確定してからローカルの一覧から除去する
    if (data.success) {
        state.bookmarks = state.bookmarks.filter(b => b.bookmarkId !== id);
        render();
    }
}

function logout() {
    setToken(null);
    state.bookmarks = [];
    clearTimeout(pollTimer);
    render();
}

function onSearch(value) {
    state.searchTerm = value;
    renderList();
}

function filteredBookmarks() {
    const term = state.searchTerm.toLowerCase();
    if (!term) return state.bookmarks;
    return state.bookmarks.filter(b =>
        b.title.toLowerCase().includes(term) ||
        b.url.toLowerCase().includes(term) ||
        b.summary.toLowerCase().includes(term));
}

function bookmarkCard(b) {
    return `<div class="card">
        <div class="topbar">
            <div>
                <img class="favicon" src="${esc(b.favicon)}" alt="">
                <a class="bookmark-title" href="${esc(b.url)}" target="_blank" rel="noopener">${esc(b.title)}</a>
                <span class="badge ${esc(b.status)}">${esc(b.status)}</span>
            </div>
            <button class="danger" onclick="removeBookmark('${esc(b.bookmarkId)}')">Delete</button>
        </div>
        <div class="bookmark-url">${esc(b.url)}</div>
        <p class="bookmark-summary">${esc(b.summary)}</p>
    </div>`;
}

function renderList() {
    const list = document.getElementById('bookmark-list');
    if (!list) return;
    const shown = filteredBookmarks();
    if (shown.length === 0) {
        list.innerHTML = `<p class="muted">${state.searchTerm ? 'No bookmarks match your search.' : 'No bookmarks yet. Add your first one above.'}</p>`;
        return;
    }
    list.innerHTML = shown.map(bookmarkCard).join('');
}

function render() {
    const app = document.getElementById('app');
    if (!api.token) {
        app.innerHTML = `
        <div class="auth-box card">
            <h1>LinkSaver</h1>
            <p class="muted">${state.mode === 'login' ? 'Sign in to your account' : 'Create a new account'}</p>
            <form onsubmit="submitAuth(event)">
                <input id="email" type="email" value="test@example.com" placeholder="Email">
                <input id="password" type="password" value="password123" placeholder="Password">
                <div class="error">${esc(state.authError)}</div>
                <div class="row">
                    <button type="submit">${state.mode === 'login' ? 'Log In' : 'Register'}</button>
                    <button type="button" class="secondary" onclick="toggleMode()">
                        ${state.mode === 'login' ? 'Need an account?' : 'Have an account?'}
                    </button>
                </div>
            </form>
        </div>`;
        return;
    }

    app.innerHTML = `
    <div class="topbar">
        <h1>LinkSaver</h1>
        <button class="secondary" onclick="logout()">Log out</button>
    </div>
    <form class="row card" onsubmit="addBookmark(event)">
        <input id="new-url" type="text" placeholder="https://example.com">
        <button type="submit">Add</button>
    </form>
    <div class="error">${esc(state.addError)}</div>
    <input id="search" type="text" placeholder="Search title, URL, summary..."
           value="${esc(state.searchTerm)}" oninput="onSearch(this.value)">
    <div id="bookmark-list"></div>`;
    renderList();
}

function toggleMode() {
    state.mode = state.mode === 'login' ? 'register' : 'login';
    state.authError = '';
    render();
}

render();
if (api.token) refreshBookmarks();
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_contains_demo_credentials_and_api_paths() {
        let page = render_app();
        assert!(page.contains("test@example.com"));
        assert!(page.contains("password123"));
        assert!(page.contains("/api/auth/login"));
        assert!(page.contains("/api/bookmarks"));
    }
}
