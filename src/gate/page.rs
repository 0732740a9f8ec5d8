/// Login form shown to every request without a valid session.
pub const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Access Required | VPN Portal</title>
    <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;600&display=swap" rel="stylesheet">
    <style>
        :root {
            --bg: #0f172a;
            --card-bg: #1e293b;
            --accent: #009FE3;
            --text: #e2e8f0;
            --muted: #94a3b8;
        }
        body {
            font-family: 'Inter', sans-serif;
            background: linear-gradient(135deg, #0f172a, #111827);
            color: var(--text);
            display: flex;
            align-items: center;
            justify-content: center;
            height: 100vh;
            margin: 0;
        }
        .login-card {
            background: var(--card-bg);
            padding: 2.5rem;
            border-radius: 1.5rem;
            box-shadow: 0 0 40px rgba(0, 0, 0, 0.5);
            width: 100%;
            max-width: 380px;
            text-align: center;
            border: 1px solid rgba(255, 255, 255, 0.05);
        }
        h1 { font-size: 1.5rem; margin-bottom: 0.5rem; color: #fff; }
        p { color: var(--muted); margin-bottom: 2rem; font-size: 0.9rem; }
        input {
            width: 100%;
            padding: 0.85rem 1rem;
            margin-bottom: 1.2rem;
            border-radius: 0.75rem;
            border: 1px solid rgba(255, 255, 255, 0.1);
            background: var(--bg);
            color: white;
            box-sizing: border-box;
            font-size: 1rem;
            outline: none;
            transition: border-color 0.3s;
        }
        input:focus { border-color: var(--accent); }
        button {
            width: 100%;
            padding: 0.85rem;
            background: var(--accent);
            color: white;
            border: none;
            border-radius: 0.75rem;
            font-weight: 600;
            cursor: pointer;
            font-size: 1rem;
            transition: opacity 0.3s;
        }
        button:hover { opacity: 0.9; }
        .locked-icon { font-size: 3rem; margin-bottom: 1rem; display: block; }
    </style>
</head>
<body>
    <div class="login-card">
        <span class="locked-icon">&#128272;</span>
        <h1>Private Access</h1>
        <p>Please enter the password to access VPN Portal</p>
        <form action="/login" method="POST">
            <input type="password" name="password" placeholder="Password" autofocus required>
            <button type="submit">Unlock</button>
        </form>
    </div>
</body>
</html>
"#;
